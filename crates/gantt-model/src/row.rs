//! Renderable Gantt rows
//!
//! The flat, parent-linked shape the chart widget consumes. Chart-native
//! fields use snake_case (`start_date`, `type`), custom fields camelCase.

use crate::status::{PersonRole, WorkItemType};
use serde::{Deserialize, Serialize};

/// Parent id of top-level rows
pub const ROOT_PARENT: &str = "0";

/// Prefix of synthetic person row ids
pub const GROUP_ID_PREFIX: &str = "person_";

/// Whether a row is a synthetic person group or a real work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    /// Synthetic per-person row; the chart calls this a "project"
    #[serde(rename = "project")]
    Group,
    /// Row derived from one record; the chart calls this a "task"
    #[serde(rename = "task")]
    Item,
}

/// One chart row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttRow {
    pub id: String,
    pub text: String,
    #[serde(rename = "start_date")]
    pub start_date: String,
    #[serde(rename = "end_date")]
    pub end_date: String,
    pub duration: u32,
    pub progress: u8,
    pub parent: String,
    #[serde(rename = "type")]
    pub kind: RowKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item_type: Option<WorkItemType>,
    pub status: String,
    pub person_id: String,
    pub person_name: String,
    pub person_role: PersonRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
}

impl GanttRow {
    /// Row id of the group row for `person_id`
    #[inline]
    #[must_use]
    pub fn group_id(person_id: &str) -> String {
        format!("{GROUP_ID_PREFIX}{person_id}")
    }

    /// Whether this is a synthetic group row
    #[inline]
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == RowKind::Group
    }

    /// Whether this row sits at the top of the tree
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }

    /// Whether the chart should refuse edits on this row
    #[inline]
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> GanttRow {
        GanttRow {
            id: "iter-1".to_string(),
            text: "Sprint".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            duration: 30,
            progress: 60,
            parent: GanttRow::group_id("p1"),
            kind: RowKind::Item,
            work_item_type: Some(WorkItemType::Iteration),
            status: "active".to_string(),
            person_id: "p1".to_string(),
            person_name: "p1".to_string(),
            person_role: PersonRole::Developer,
            color: Some("#1890ff".to_string()),
            url: None,
            readonly: None,
        }
    }

    #[test]
    fn serializes_chart_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "iter-1",
                "text": "Sprint",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "duration": 30,
                "progress": 60,
                "parent": "person_p1",
                "type": "task",
                "workItemType": "iteration",
                "status": "active",
                "personId": "p1",
                "personName": "p1",
                "personRole": "developer",
                "color": "#1890ff"
            })
        );
    }

    #[test]
    fn decodes_back() {
        let row = sample();
        let text = serde_json::to_string(&row).unwrap();
        let back: GanttRow = serde_json::from_str(&text).unwrap();
        assert_eq!(back, row);
        assert!(!back.is_group());
        assert!(!back.is_root());
        assert!(!back.is_readonly());
    }

    #[test]
    fn group_ids() {
        assert_eq!(GanttRow::group_id("person-3"), "person_person-3");
    }
}
