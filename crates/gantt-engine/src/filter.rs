//! Row filtering
//!
//! A [`FilterConfig`] is a set of optional predicates combined with AND.
//! Missing or empty values impose no constraint. Filtering borrows the row
//! sequence and only allocates when at least one predicate is active.

use crate::error::ConfigError;
use gantt_model::lenient;
use gantt_model::{GanttRow, PersonRole, SpaceType, UnknownVariant};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Optional per-field constraints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Department; rows carry no department so this never excludes a row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Case-insensitive substring of the row text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Allow-list of work-item kinds
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "gantt_model::lenient::blank_space_type"
    )]
    pub space_type: Option<SpaceType>,
    /// Case-insensitive substring of the row text, group rows exempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,
    /// Exact person role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_type: Option<PersonRole>,
    /// Exact person id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
}

impl FilterConfig {
    /// Empty configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With project substring
    #[inline]
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// With iteration substring
    #[inline]
    #[must_use]
    pub fn with_iteration(mut self, iteration: impl Into<String>) -> Self {
        self.iteration = Some(iteration.into());
        self
    }

    /// With space type
    #[inline]
    #[must_use]
    pub fn with_space_type(mut self, space_type: SpaceType) -> Self {
        self.space_type = Some(space_type);
        self
    }

    /// With person role
    #[inline]
    #[must_use]
    pub fn with_person_type(mut self, role: impl Into<PersonRole>) -> Self {
        self.person_type = Some(role.into());
        self
    }

    /// With person id
    #[inline]
    #[must_use]
    pub fn with_person(mut self, person: impl Into<String>) -> Self {
        self.person = Some(person.into());
        self
    }

    /// With department
    #[inline]
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Overwrite fields that are set in `patch`
    pub fn merge(&mut self, patch: &FilterConfig) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.department, &patch.department);
        take(&mut self.project, &patch.project);
        take(&mut self.space_type, &patch.space_type);
        take(&mut self.iteration, &patch.iteration);
        take(&mut self.person_type, &patch.person_type);
        take(&mut self.person, &patch.person);
    }

    /// Set one field from its string form
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an unknown space type.
    pub fn set(&mut self, key: FilterKey, value: &str) -> Result<(), ConfigError> {
        let owned = Some(value.to_string());
        match key {
            FilterKey::Department => self.department = owned,
            FilterKey::Project => self.project = owned,
            FilterKey::Iteration => self.iteration = owned,
            FilterKey::Person => self.person = owned,
            FilterKey::PersonType => self.person_type = Some(PersonRole::from(value)),
            FilterKey::SpaceType => {
                self.space_type = lenient::parse_optional_space_type(value)
                    .map_err(|_| ConfigError::invalid_value(key.as_str(), value))?;
            }
        }
        Ok(())
    }

    /// Clear one field
    pub fn remove(&mut self, key: FilterKey) {
        match key {
            FilterKey::Department => self.department = None,
            FilterKey::Project => self.project = None,
            FilterKey::SpaceType => self.space_type = None,
            FilterKey::Iteration => self.iteration = None,
            FilterKey::PersonType => self.person_type = None,
            FilterKey::Person => self.person = None,
        }
    }

    /// Clear every field
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Non-empty value of one field
    #[must_use]
    pub fn value(&self, key: FilterKey) -> Option<&str> {
        let raw = match key {
            FilterKey::Department => self.department.as_deref(),
            FilterKey::Project => self.project.as_deref(),
            FilterKey::SpaceType => self.space_type.map(SpaceType::as_str),
            FilterKey::Iteration => self.iteration.as_deref(),
            FilterKey::PersonType => self.person_type.as_ref().map(PersonRole::as_str),
            FilterKey::Person => self.person.as_deref(),
        };
        raw.filter(|value| !value.is_empty())
    }

    /// Number of fields holding a non-empty value
    #[must_use]
    pub fn active_count(&self) -> usize {
        FilterKey::ALL
            .iter()
            .filter(|key| self.value(**key).is_some())
            .count()
    }

    /// Whether any field holds a non-empty value
    #[inline]
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }

    /// Non-empty fields keyed by wire name, in declaration order
    #[must_use]
    pub fn query_params(&self) -> IndexMap<&'static str, String> {
        FilterKey::ALL
            .iter()
            .filter_map(|key| self.value(*key).map(|value| (key.as_str(), value.to_string())))
            .collect()
    }

    /// Whether `row` passes every active predicate
    #[must_use]
    pub fn matches(&self, row: &GanttRow) -> bool {
        Predicates::compile(self).matches(row)
    }
}

/// Names of the filter fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// `department`
    Department,
    /// `project`
    Project,
    /// `spaceType`
    SpaceType,
    /// `iteration`
    Iteration,
    /// `personType`
    PersonType,
    /// `person`
    Person,
}

impl FilterKey {
    /// Every key in wire order
    pub const ALL: [FilterKey; 6] = [
        FilterKey::Department,
        FilterKey::Project,
        FilterKey::SpaceType,
        FilterKey::Iteration,
        FilterKey::PersonType,
        FilterKey::Person,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Department => "department",
            FilterKey::Project => "project",
            FilterKey::SpaceType => "spaceType",
            FilterKey::Iteration => "iteration",
            FilterKey::PersonType => "personType",
            FilterKey::Person => "person",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("filter key", s))
    }
}

/// Active predicates with their needles prepared
#[derive(Debug, Default)]
struct Predicates<'c> {
    project: Option<String>,
    iteration: Option<String>,
    person_type: Option<&'c PersonRole>,
    person: Option<&'c str>,
    space_type: Option<SpaceType>,
}

impl<'c> Predicates<'c> {
    fn compile(config: &'c FilterConfig) -> Self {
        fn needle(value: Option<&String>) -> Option<String> {
            value.filter(|v| !v.is_empty()).map(|v| v.to_lowercase())
        }
        Self {
            project: needle(config.project.as_ref()),
            iteration: needle(config.iteration.as_ref()),
            person_type: config
                .person_type
                .as_ref()
                .filter(|role| !role.as_str().is_empty()),
            person: config.person.as_deref().filter(|p| !p.is_empty()),
            space_type: config.space_type,
        }
    }

    fn is_empty(&self) -> bool {
        self.project.is_none()
            && self.iteration.is_none()
            && self.person_type.is_none()
            && self.person.is_none()
            && self.space_type.is_none()
    }

    fn matches(&self, row: &GanttRow) -> bool {
        if self.project.is_some() || self.iteration.is_some() {
            let text = row.text.to_lowercase();
            if let Some(project) = &self.project {
                if !text.contains(project.as_str()) {
                    return false;
                }
            }
            if let Some(iteration) = &self.iteration {
                if !row.is_group() && !text.contains(iteration.as_str()) {
                    return false;
                }
            }
        }

        if let Some(role) = self.person_type {
            if &row.person_role != role {
                return false;
            }
        }

        if let Some(person) = self.person {
            if row.person_id != person {
                return false;
            }
        }

        if let (Some(space_type), Some(kind)) = (self.space_type, row.work_item_type) {
            if !space_type.allowed_work_items().contains(&kind) {
                return false;
            }
        }

        true
    }
}

/// Rows passing every active predicate of `filters`, in input order
///
/// Returns the input itself, without copying, when nothing is active.
#[must_use]
pub fn filter_rows<'r>(rows: &'r [GanttRow], filters: &FilterConfig) -> Cow<'r, [GanttRow]> {
    let predicates = Predicates::compile(filters);
    if predicates.is_empty() {
        return Cow::Borrowed(rows);
    }

    let filtered: Vec<GanttRow> = rows
        .iter()
        .filter(|row| predicates.matches(row))
        .cloned()
        .collect();

    tracing::debug!("Filtered rows: {}/{}", filtered.len(), rows.len());
    Cow::Owned(filtered)
}
