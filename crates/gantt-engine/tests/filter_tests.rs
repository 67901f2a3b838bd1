use gantt_engine::{filter_rows, transform, FilterConfig, FilterKey, TransformOptions};
use gantt_fixtures::{group_row, item_row, simple_data};
use gantt_model::{GanttRow, Iteration, RawData, SpaceType, ViewType, WorkItemType};
use pretty_assertions::assert_eq;

fn ids(rows: &[GanttRow]) -> Vec<&str> {
    rows.iter().map(|r| r.id.as_str()).collect()
}

/// Ten rows, four of them owned by `p1` (one group)
fn ten_rows() -> Vec<GanttRow> {
    let kind = WorkItemType::Iteration;
    vec![
        group_row("p1", kind),
        item_row("a", "Sprint A", "p1", kind),
        item_row("b", "Sprint B", "p1", kind),
        group_row("p2", kind),
        item_row("c", "Sprint C", "p2", kind),
        item_row("d", "Sprint D", "p2", kind),
        group_row("p3", kind),
        item_row("e", "Sprint E", "p3", kind),
        item_row("f", "Sprint F", "p1", kind),
        item_row("g", "Sprint G", "p3", kind),
    ]
}

#[test]
fn test_person_filter_keeps_owned_rows_in_order() {
    let rows = ten_rows();
    let filtered = filter_rows(&rows, &FilterConfig::new().with_person("p1"));
    assert_eq!(ids(&filtered), vec!["person_p1", "a", "b", "f"]);
}

#[test]
fn test_team_space_keeps_task_and_untagged_rows() {
    let mut rows = vec![
        item_row("it", "Iteration", "p1", WorkItemType::Iteration),
        item_row("req", "Requirement", "p1", WorkItemType::Requirement),
        item_row("task", "Task", "p1", WorkItemType::Task),
        item_row("bare", "Untagged", "p1", WorkItemType::Task),
    ];
    rows[3].work_item_type = None;

    let filtered = filter_rows(&rows, &FilterConfig::new().with_space_type(SpaceType::Team));
    assert_eq!(ids(&filtered), vec!["task", "bare"]);
}

#[test]
fn test_project_space_excludes_tasks() {
    let rows = vec![
        item_row("it", "Iteration", "p1", WorkItemType::Iteration),
        item_row("req", "Requirement", "p1", WorkItemType::Requirement),
        item_row("task", "Task", "p1", WorkItemType::Task),
    ];
    let filtered = filter_rows(&rows, &FilterConfig::new().with_space_type(SpaceType::Project));
    assert_eq!(ids(&filtered), vec!["it", "req"]);
}

#[test]
fn test_filters_over_transformed_simple_data() {
    let data = simple_data();
    let output = transform(ViewType::Requirement, &data, &TransformOptions::new());

    let product = filter_rows(&output.rows, &FilterConfig::new().with_space_type(SpaceType::Product));
    assert_eq!(
        ids(&product),
        vec!["person_person-1", "req-1", "req-2", "person_person-2", "req-3"]
    );

    let tester = filter_rows(&output.rows, &FilterConfig::new().with_person_type("tester"));
    assert_eq!(ids(&tester), vec!["person_person-2", "req-3"]);

    let filter = FilterConfig::new().with_iteration("FILTER");
    assert_eq!(
        ids(&filter_rows(&output.rows, &filter)),
        vec!["person_person-1", "req-2", "task-3", "person_person-2"]
    );
}

#[test]
fn test_reserved_department_filter_is_inert() {
    let rows = ten_rows();
    let mut config = FilterConfig::new();
    config.set(FilterKey::Department, "rd").unwrap();
    assert_eq!(filter_rows(&rows, &config).len(), rows.len());
}

#[test]
fn test_filter_over_empty_transform() {
    let output = transform(ViewType::Iteration, &RawData::default(), &TransformOptions::new());
    assert!(output.rows.is_empty());
    assert!(filter_rows(&output.rows, &FilterConfig::new().with_person("p1")).is_empty());
}

#[test]
fn test_single_iteration_example() {
    let data = RawData::new(
        vec![Iteration::new("iter-1", "Sprint 1", "2024-01-01", "2024-01-31", "p1")
            .with_status("active")],
        Vec::new(),
    );
    let output = transform(ViewType::Iteration, &data, &TransformOptions::new());

    assert_eq!(ids(&output.rows), vec!["person_p1", "iter-1"]);
    assert_eq!(output.rows[0].parent, "0");
    assert_eq!(output.rows[1].parent, "person_p1");
    assert_eq!(output.rows[1].duration, 30);
    assert_eq!(output.rows[1].color.as_deref(), Some("#1890ff"));
}
