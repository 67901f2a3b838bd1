use gantt_engine::{
    filter_rows, transform_iterations, transform_requirements, FilterConfig, TransformOptions,
};
use gantt_model::dates::duration_days;
use gantt_model::{GanttRow, Iteration, Requirement, SpaceType, Task, ROOT_PARENT};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn date() -> impl Strategy<Value = String> {
    (1u32..=12, 1u32..=28).prop_map(|(month, day)| format!("2024-{month:02}-{day:02}"))
}

fn person() -> impl Strategy<Value = String> {
    (0u8..4).prop_map(|n| format!("p{n}"))
}

fn iterations() -> impl Strategy<Value = Vec<Iteration>> {
    proptest::collection::vec((person(), date(), date(), 0u32..30, 0u32..30), 0..24).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (person, start, end, completed, total))| {
                    Iteration::new(format!("iter-{i}"), format!("Sprint {i}"), start, end, person)
                        .with_counts(completed, total)
                })
                .collect()
        },
    )
}

fn requirements() -> impl Strategy<Value = Vec<Requirement>> {
    proptest::collection::vec((person(), date(), date(), 0usize..4), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (person, start, end, tasks))| {
                let requirement = Requirement::new(
                    format!("req-{i}"),
                    format!("Requirement {i}"),
                    start.clone(),
                    end.clone(),
                    person.clone(),
                );
                (0..tasks).fold(requirement, |requirement, j| {
                    let task = Task::new(
                        format!("task-{i}-{j}"),
                        format!("Task {i}.{j}"),
                        start.clone(),
                        end.clone(),
                        person.clone(),
                    );
                    requirement.with_task(task)
                })
            })
            .collect()
    })
}

fn filter_config() -> impl Strategy<Value = FilterConfig> {
    (
        proptest::option::of(person()),
        proptest::option::of(prop_oneof![Just("sprint"), Just("1"), Just("task"), Just("")]),
        proptest::option::of(prop_oneof![
            Just(SpaceType::Project),
            Just(SpaceType::Product),
            Just(SpaceType::Team)
        ]),
    )
        .prop_map(|(person, text, space)| FilterConfig {
            person,
            project: text.map(str::to_string),
            space_type: space,
            ..FilterConfig::default()
        })
}

fn is_subsequence(part: &[GanttRow], whole: &[GanttRow]) -> bool {
    let mut rest = whole.iter();
    part.iter().all(|row| rest.any(|candidate| candidate == row))
}

proptest! {
    #[test]
    fn prop_one_group_per_person(iterations in iterations()) {
        let output = transform_iterations(&iterations, &TransformOptions::new());

        let persons: HashSet<_> = iterations.iter().map(|i| i.person_id.as_str()).collect();
        prop_assert_eq!(output.group_count(), persons.len());
        prop_assert_eq!(output.item_count(), iterations.len());
        prop_assert!(output.diagnostics.iter().all(|d| !d.kind.is_skip()));

        let ids: HashSet<_> = output.rows.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(ids.len(), output.rows.len());
    }

    #[test]
    fn prop_items_hang_under_their_person(iterations in iterations()) {
        let output = transform_iterations(&iterations, &TransformOptions::new());
        for row in &output.rows {
            if row.is_group() {
                prop_assert_eq!(row.parent.as_str(), ROOT_PARENT);
                prop_assert_eq!(row.duration, 365);
            } else {
                prop_assert_eq!(row.parent.clone(), GanttRow::group_id(&row.person_id));
            }
        }
    }

    #[test]
    fn prop_duration_and_progress_bounds(iterations in iterations()) {
        let output = transform_iterations(&iterations, &TransformOptions::new());
        let by_id: HashMap<_, _> = iterations.iter().map(|i| (i.id.as_str(), i)).collect();

        for row in output.rows.iter().filter(|r| !r.is_group()) {
            let source = by_id[row.id.as_str()];
            prop_assert_eq!(row.duration, duration_days(&source.start_date, &source.end_date).unwrap());
            prop_assert!(row.progress <= 100);
            if source.total_work_items == Some(0) {
                prop_assert_eq!(row.progress, 0);
            }
        }
    }

    #[test]
    fn prop_tasks_follow_their_requirement(requirements in requirements()) {
        let output = transform_requirements(&requirements, &TransformOptions::new());

        let task_total: usize = requirements.iter().map(|r| r.tasks().len()).sum();
        let task_rows: Vec<_> = output.rows.iter().filter(|r| r.id.starts_with("task-")).collect();
        prop_assert_eq!(task_rows.len(), task_total);

        for requirement in &requirements {
            for task in requirement.tasks() {
                let row = output.rows.iter().find(|r| r.id == task.id).unwrap();
                prop_assert_eq!(&row.parent, &requirement.id);
            }
        }
    }

    #[test]
    fn prop_empty_filter_is_identity(iterations in iterations()) {
        let output = transform_iterations(&iterations, &TransformOptions::new());
        let filtered = filter_rows(&output.rows, &FilterConfig::default());
        prop_assert_eq!(filtered.as_ref(), output.rows.as_slice());
    }

    #[test]
    fn prop_filter_idempotent_and_ordered(
        requirements in requirements(),
        config in filter_config()
    ) {
        let output = transform_requirements(&requirements, &TransformOptions::new());
        let once = filter_rows(&output.rows, &config).into_owned();
        let twice = filter_rows(&once, &config).into_owned();

        prop_assert_eq!(&once, &twice);
        prop_assert!(is_subsequence(&once, &output.rows));
        prop_assert!(once.iter().all(|row| config.matches(row)));
    }
}
