//! Domain records
//!
//! Iterations, requirements and tasks as delivered by the data source. Field
//! names follow the camelCase wire shape. Every field has a default so a
//! partially filled record still decodes; the transform decides what to do
//! with missing values.

use crate::status::{
    IterationStatus, PersonRole, Priority, RequirementStatus, SpaceType, TaskStatus, ViewType,
    WorkItemType,
};
use serde::{Deserialize, Serialize};

/// Version iteration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Iteration {
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub status: IterationStatus,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::space_type"
    )]
    pub space_type: Option<SpaceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub person_id: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub person_role: PersonRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_work_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_work_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_persons: Option<u32>,
}

impl Iteration {
    /// Create iteration with the fields the chart needs
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        person_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            person_id: person_id.into(),
            status: IterationStatus::Planning,
            person_role: PersonRole::Developer,
            ..Self::default()
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: impl Into<IterationStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// With person role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<PersonRole>) -> Self {
        self.person_role = role.into();
        self
    }

    /// With completed/total work-item counts
    #[inline]
    #[must_use]
    pub fn with_counts(mut self, completed: u32, total: u32) -> Self {
        self.completed_work_items = Some(completed);
        self.total_work_items = Some(total);
        self
    }

    /// With navigation URL
    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// With space classification
    #[inline]
    #[must_use]
    pub fn with_space(mut self, space_type: SpaceType, project_name: impl Into<String>) -> Self {
        self.space_type = Some(space_type);
        self.project_name = Some(project_name.into());
        self
    }
}

/// Requirement, optionally carrying its tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Requirement {
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub status: RequirementStatus,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub priority: Priority,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lenient::space_type"
    )]
    pub space_type: Option<SpaceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub person_id: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub person_role: PersonRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Requirement {
    /// Create requirement with the fields the chart needs
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        person_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            person_id: person_id.into(),
            status: RequirementStatus::Pending,
            priority: Priority::Medium,
            person_role: PersonRole::Developer,
            ..Self::default()
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: impl Into<RequirementStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// With person role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<PersonRole>) -> Self {
        self.person_role = role.into();
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Link to a parent iteration
    #[inline]
    #[must_use]
    pub fn in_iteration(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.iteration_id = Some(id.into());
        self.iteration_name = Some(name.into());
        self
    }

    /// Append a nested task
    #[inline]
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.get_or_insert_with(Vec::new).push(task);
        self
    }

    /// With navigation URL
    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Nested tasks, empty when none were supplied
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or(&[])
    }
}

/// Task, usually nested under a requirement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub person_id: String,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub person_role: PersonRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Task {
    /// Create task with the fields the chart needs
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        person_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            person_id: person_id.into(),
            status: TaskStatus::Todo,
            person_role: PersonRole::Developer,
            ..Self::default()
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: impl Into<TaskStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// With person role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<PersonRole>) -> Self {
        self.person_role = role.into();
        self
    }

    /// With estimated/actual effort in hours
    #[inline]
    #[must_use]
    pub fn with_hours(mut self, estimated: f64, actual: f64) -> Self {
        self.estimated_hours = Some(estimated);
        self.actual_hours = Some(actual);
        self
    }

    /// Link to the owning requirement
    #[inline]
    #[must_use]
    pub fn under(mut self, requirement: &Requirement) -> Self {
        self.requirement_id = Some(requirement.id.clone());
        self.requirement_name = Some(requirement.name.clone());
        self.iteration_id.clone_from(&requirement.iteration_id);
        self.iteration_name.clone_from(&requirement.iteration_name);
        self
    }

    /// With navigation URL
    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Borrowed view over one record of any kind
///
/// Closed set: every consumer matches all three arms.
#[derive(Debug, Clone, Copy)]
pub enum WorkItem<'a> {
    /// Iteration record
    Iteration(&'a Iteration),
    /// Requirement record
    Requirement(&'a Requirement),
    /// Task record
    Task(&'a Task),
}

impl<'a> WorkItem<'a> {
    /// Kind tag
    #[inline]
    #[must_use]
    pub fn work_item_type(&self) -> WorkItemType {
        match self {
            WorkItem::Iteration(_) => WorkItemType::Iteration,
            WorkItem::Requirement(_) => WorkItemType::Requirement,
            WorkItem::Task(_) => WorkItemType::Task,
        }
    }

    /// Record id
    #[must_use]
    pub fn id(&self) -> &'a str {
        match self {
            WorkItem::Iteration(i) => &i.id,
            WorkItem::Requirement(r) => &r.id,
            WorkItem::Task(t) => &t.id,
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            WorkItem::Iteration(i) => &i.name,
            WorkItem::Requirement(r) => &r.name,
            WorkItem::Task(t) => &t.name,
        }
    }

    /// Start and end date strings
    #[must_use]
    pub fn dates(&self) -> (&'a str, &'a str) {
        match self {
            WorkItem::Iteration(i) => (&i.start_date, &i.end_date),
            WorkItem::Requirement(r) => (&r.start_date, &r.end_date),
            WorkItem::Task(t) => (&t.start_date, &t.end_date),
        }
    }

    /// Status in wire form
    #[must_use]
    pub fn status(&self) -> &'a str {
        match self {
            WorkItem::Iteration(i) => i.status.as_str(),
            WorkItem::Requirement(r) => r.status.as_str(),
            WorkItem::Task(t) => t.status.as_str(),
        }
    }

    /// Owning person id
    #[must_use]
    pub fn person_id(&self) -> &'a str {
        match self {
            WorkItem::Iteration(i) => &i.person_id,
            WorkItem::Requirement(r) => &r.person_id,
            WorkItem::Task(t) => &t.person_id,
        }
    }

    /// Owning person's role
    #[must_use]
    pub fn person_role(&self) -> &'a PersonRole {
        match self {
            WorkItem::Iteration(i) => &i.person_role,
            WorkItem::Requirement(r) => &r.person_role,
            WorkItem::Task(t) => &t.person_role,
        }
    }

    /// Navigation URL
    #[must_use]
    pub fn url(&self) -> Option<&'a str> {
        match self {
            WorkItem::Iteration(i) => i.url.as_deref(),
            WorkItem::Requirement(r) => r.url.as_deref(),
            WorkItem::Task(t) => t.url.as_deref(),
        }
    }

    /// Completed and total work-item counts, when the record has both
    #[must_use]
    pub fn work_counts(&self) -> Option<(u32, u32)> {
        match self {
            WorkItem::Iteration(i) => i.completed_work_items.zip(i.total_work_items),
            WorkItem::Requirement(_) | WorkItem::Task(_) => None,
        }
    }
}

impl<'a> From<&'a Iteration> for WorkItem<'a> {
    fn from(iteration: &'a Iteration) -> Self {
        WorkItem::Iteration(iteration)
    }
}

impl<'a> From<&'a Requirement> for WorkItem<'a> {
    fn from(requirement: &'a Requirement) -> Self {
        WorkItem::Requirement(requirement)
    }
}

impl<'a> From<&'a Task> for WorkItem<'a> {
    fn from(task: &'a Task) -> Self {
        WorkItem::Task(task)
    }
}

/// Everything the pipeline can be fed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawData {
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub iterations: Vec<Iteration>,
    #[serde(deserialize_with = "crate::lenient::null_as_default")]
    pub requirements: Vec<Requirement>,
}

impl RawData {
    /// Create from both collections
    #[inline]
    #[must_use]
    pub fn new(iterations: Vec<Iteration>, requirements: Vec<Requirement>) -> Self {
        Self {
            iterations,
            requirements,
        }
    }

    /// Number of top-level records shown by `view`
    #[inline]
    #[must_use]
    pub fn len_for(&self, view: ViewType) -> usize {
        match view {
            ViewType::Iteration => self.iterations.len(),
            ViewType::Requirement => self.requirements.len(),
        }
    }

    /// Whether both collections are empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty() && self.requirements.is_empty()
    }
}
