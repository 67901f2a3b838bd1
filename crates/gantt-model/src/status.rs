//! Status, role and classification enums
//!
//! Status and role values arrive as free strings from the data source. The
//! "open" enums below keep the known values as variants and preserve
//! anything else verbatim in `Other`, so decoding never fails on an
//! unfamiliar value and the source text survives into the rendered row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declare a string-backed enum with a catch-all `Other` variant
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value outside the known set, kept as received
            Other(String),
        }

        impl $name {
            /// All known variants in declaration order
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            /// Whether this is one of the known variants
            #[inline]
            #[must_use]
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::Other(String::new())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum! {
    /// Lifecycle of a version iteration
    IterationStatus {
        /// Scheduled, not started
        Planning => "planning",
        /// In progress
        Active => "active",
        /// Finished
        Completed => "completed",
        /// Abandoned
        Cancelled => "cancelled",
    }
}

open_enum! {
    /// Lifecycle of a requirement
    RequirementStatus {
        /// Not yet picked up
        Pending => "pending",
        /// Being implemented
        InProgress => "in_progress",
        /// Under test
        Testing => "testing",
        /// Delivered
        Completed => "completed",
        /// Declined
        Rejected => "rejected",
    }
}

open_enum! {
    /// Lifecycle of a task
    TaskStatus {
        /// Not started
        Todo => "todo",
        /// Being worked on
        InProgress => "in_progress",
        /// Awaiting review
        Review => "review",
        /// Finished
        Done => "done",
    }
}

open_enum! {
    /// Role a person holds on a work item
    PersonRole {
        /// Developer
        Developer => "developer",
        /// Tester
        Tester => "tester",
        /// Product manager
        Product => "product",
        /// Owner
        Owner => "owner",
        /// Creator
        Creator => "creator",
    }
}

open_enum! {
    /// Requirement priority
    Priority {
        /// Low
        Low => "low",
        /// Medium
        Medium => "medium",
        /// High
        High => "high",
        /// Urgent
        Urgent => "urgent",
    }
}

/// Coarse classification of the space a work item lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    /// Project space
    Project,
    /// Product space
    Product,
    /// Team space
    Team,
}

impl SpaceType {
    /// All space types
    pub const ALL: [SpaceType; 3] = [SpaceType::Project, SpaceType::Product, SpaceType::Team];

    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SpaceType::Project => "project",
            SpaceType::Product => "product",
            SpaceType::Team => "team",
        }
    }

    /// Work-item kinds visible under this space type
    #[inline]
    #[must_use]
    pub fn allowed_work_items(self) -> &'static [WorkItemType] {
        match self {
            SpaceType::Project => &[WorkItemType::Iteration, WorkItemType::Requirement],
            SpaceType::Product => &[WorkItemType::Requirement],
            SpaceType::Team => &[WorkItemType::Task],
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpaceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(SpaceType::Project),
            "product" => Ok(SpaceType::Product),
            "team" => Ok(SpaceType::Team),
            other => Err(UnknownVariant::new("space type", other)),
        }
    }
}

/// Kind of work item a row was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemType {
    /// Version iteration
    Iteration,
    /// Requirement
    Requirement,
    /// Task
    Task,
}

impl WorkItemType {
    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WorkItemType::Iteration => "iteration",
            WorkItemType::Requirement => "requirement",
            WorkItemType::Task => "task",
        }
    }
}

impl fmt::Display for WorkItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which raw collection the chart is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    /// One row per iteration
    #[default]
    Iteration,
    /// One row per requirement, with nested task rows
    Requirement,
}

impl ViewType {
    /// Work-item kind at the top level of this view
    #[inline]
    #[must_use]
    pub fn work_item_type(self) -> WorkItemType {
        match self {
            ViewType::Iteration => WorkItemType::Iteration,
            ViewType::Requirement => WorkItemType::Requirement,
        }
    }

    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.work_item_type().as_str()
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iteration" => Ok(ViewType::Iteration),
            "requirement" => Ok(ViewType::Requirement),
            other => Err(UnknownVariant::new("view type", other)),
        }
    }
}

/// A string did not name any variant of a closed enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    /// Enum being parsed
    pub kind: &'static str,
    /// Offending input
    pub value: String,
}

impl UnknownVariant {
    /// Create error for `value` not naming a `kind`
    #[inline]
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_enum_round_trips_known_values() {
        assert_eq!(TaskStatus::from("in_progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert!(TaskStatus::Done.is_known());
    }

    #[test]
    fn open_enum_keeps_unknown_values() {
        let status = IterationStatus::from("archived");
        assert_eq!(status, IterationStatus::Other("archived".to_string()));
        assert_eq!(status.as_str(), "archived");
        assert!(!status.is_known());
    }

    #[test]
    fn open_enum_deserializes_from_plain_string() {
        let role: PersonRole = serde_json::from_str("\"tester\"").unwrap();
        assert_eq!(role, PersonRole::Tester);

        let odd: PersonRole = serde_json::from_str("\"intern\"").unwrap();
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"intern\"");
    }

    #[test]
    fn space_type_allow_lists() {
        assert_eq!(
            SpaceType::Project.allowed_work_items(),
            &[WorkItemType::Iteration, WorkItemType::Requirement]
        );
        assert_eq!(SpaceType::Product.allowed_work_items(), &[WorkItemType::Requirement]);
        assert_eq!(SpaceType::Team.allowed_work_items(), &[WorkItemType::Task]);
    }

    #[test]
    fn view_type_parses() {
        assert_eq!("requirement".parse::<ViewType>().unwrap(), ViewType::Requirement);
        let err = "defect".parse::<ViewType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown view type: 'defect'");
    }

    #[test]
    fn known_lists_cover_all_roles() {
        assert_eq!(PersonRole::KNOWN.len(), 5);
        assert_eq!(PersonRole::KNOWN[0], PersonRole::Developer);
    }
}
