//! Gantt Fixtures
//!
//! Shared test data for the workspace: a small hand-written data set with
//! known ids, and a seeded generator for larger realistic sets.

#![allow(missing_docs)]

pub mod generator;

pub use generator::{MockConfig, MockGenerator, MockPerson};

use gantt_model::{
    GanttRow, Iteration, IterationStatus, PersonRole, Priority, RawData, Requirement,
    RequirementStatus, RowKind, SpaceType, Task, TaskStatus, WorkItemType, ROOT_PARENT,
};

const PROJECT: &str = "Gantt Project";

/// Three iterations and three requirements owned by `person-1` and `person-2`
///
/// `person-1` owns `iter-1`, `iter-2`, `req-1` (tasks `task-1`, `task-2`) and
/// `req-2` (task `task-3`); `person-2` owns `iter-3` and `req-3` (no tasks).
#[must_use]
pub fn simple_data() -> RawData {
    let iterations = vec![
        Iteration::new("iter-1", "Sprint 2024.1", "2024-01-01", "2024-01-31", "person-1")
            .with_status(IterationStatus::Active)
            .with_space(SpaceType::Project, PROJECT)
            .with_counts(6, 10)
            .with_url("https://example.com/iterations/iter-1"),
        Iteration::new("iter-2", "Sprint 2024.2", "2024-02-01", "2024-02-29", "person-1")
            .with_status(IterationStatus::Planning)
            .with_role(PersonRole::Owner)
            .with_space(SpaceType::Project, PROJECT)
            .with_counts(2, 8)
            .with_url("https://example.com/iterations/iter-2"),
        Iteration::new("iter-3", "Bug Fix 2024.1", "2024-01-15", "2024-02-15", "person-2")
            .with_status(IterationStatus::Completed)
            .with_role(PersonRole::Tester)
            .with_space(SpaceType::Project, PROJECT)
            .with_counts(5, 5)
            .with_url("https://example.com/iterations/iter-3"),
    ];

    let req_1 = Requirement::new("req-1", "Gantt component", "2024-01-01", "2024-01-20", "person-1")
        .with_status(RequirementStatus::Completed)
        .with_priority(Priority::High)
        .in_iteration("iter-1", "Sprint 2024.1");
    let req_1 = req_1
        .clone()
        .with_task(
            Task::new("task-1", "Chart widget", "2024-01-01", "2024-01-10", "person-1")
                .with_status(TaskStatus::Done)
                .with_hours(40.0, 35.0)
                .under(&req_1),
        )
        .with_task(
            Task::new("task-2", "Data shaping", "2024-01-11", "2024-01-20", "person-1")
                .with_status(TaskStatus::Done)
                .with_hours(30.0, 28.0)
                .under(&req_1),
        );

    let req_2 = Requirement::new("req-2", "Filter panel", "2024-01-21", "2024-02-10", "person-1")
        .with_status(RequirementStatus::InProgress)
        .in_iteration("iter-2", "Sprint 2024.2");
    let req_2 = req_2.clone().with_task(
        Task::new("task-3", "Filter controls", "2024-01-21", "2024-01-31", "person-1")
            .with_status(TaskStatus::InProgress)
            .with_hours(24.0, 18.0)
            .under(&req_2),
    );

    let mut req_3 =
        Requirement::new("req-3", "Test suite", "2024-01-15", "2024-02-15", "person-2")
            .with_status(RequirementStatus::Completed)
            .with_role(PersonRole::Tester)
            .in_iteration("iter-3", "Bug Fix 2024.1");
    req_3.tasks = Some(Vec::new());

    RawData::new(iterations, vec![req_1, req_2, req_3])
}

/// Item row with fixed dates, for filter tests that need no transform
#[must_use]
pub fn item_row(id: &str, text: &str, person_id: &str, item: WorkItemType) -> GanttRow {
    GanttRow {
        id: id.to_string(),
        text: text.to_string(),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-01-31".to_string(),
        duration: 30,
        progress: 0,
        parent: GanttRow::group_id(person_id),
        kind: RowKind::Item,
        work_item_type: Some(item),
        status: "active".to_string(),
        person_id: person_id.to_string(),
        person_name: person_id.to_string(),
        person_role: PersonRole::Developer,
        color: None,
        url: None,
        readonly: None,
    }
}

/// Group row for `person_id`
#[must_use]
pub fn group_row(person_id: &str, item: WorkItemType) -> GanttRow {
    GanttRow {
        id: GanttRow::group_id(person_id),
        text: format!("Person {person_id}"),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-12-31".to_string(),
        duration: 365,
        parent: ROOT_PARENT.to_string(),
        kind: RowKind::Group,
        readonly: Some(true),
        ..item_row("", "", person_id, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_data_shape() {
        let data = simple_data();
        assert_eq!(data.iterations.len(), 3);
        assert_eq!(data.requirements.len(), 3);
        let task_count: usize = data.requirements.iter().map(|r| r.tasks().len()).sum();
        assert_eq!(task_count, 3);
        assert_eq!(data.requirements[0].tasks()[1].requirement_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn group_row_is_root() {
        let row = group_row("p1", WorkItemType::Iteration);
        assert!(row.is_group());
        assert!(row.is_root());
        assert_eq!(row.id, "person_p1");
    }
}
