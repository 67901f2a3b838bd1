//! Gantt Model
//!
//! Data types shared by the timeline workspace:
//! - Work-item records (iterations, requirements, tasks) as the data source
//!   delivers them
//! - Status, role and classification enums
//! - The flat [`GanttRow`] the chart widget renders
//! - Date interpretation for record date strings
//!
//! # Example
//!
//! ```rust
//! use gantt_model::{Iteration, IterationStatus, WorkItem};
//!
//! let iteration = Iteration::new("iter-1", "Sprint 2024.1", "2024-01-01", "2024-01-31", "p1")
//!     .with_status(IterationStatus::Active)
//!     .with_counts(6, 10);
//!
//! assert_eq!(WorkItem::from(&iteration).status(), "active");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod dates;
pub mod lenient;
mod records;
mod row;
mod status;

// Re-exports
pub use dates::DateError;
pub use records::{Iteration, RawData, Requirement, Task, WorkItem};
pub use row::{GanttRow, RowKind, GROUP_ID_PREFIX, ROOT_PARENT};
pub use status::{
    IterationStatus, PersonRole, Priority, RequirementStatus, SpaceType, TaskStatus,
    UnknownVariant, ViewType, WorkItemType,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
