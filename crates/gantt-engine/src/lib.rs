//! Gantt Engine
//!
//! Turns work-item records into chart rows and narrows them down:
//! - Transform: iterations, or requirements with nested tasks, flattened into
//!   person-grouped rows
//! - Filter: AND-combined predicates over the row sequence
//! - Filter option lists for the controls
//! - Configuration loading (JSON/YAML) and the [`GanttPipeline`] state that
//!   ties the stages together
//!
//! # Example
//!
//! ```rust
//! use gantt_engine::{filter_rows, transform, FilterConfig, TransformOptions};
//! use gantt_model::{Iteration, RawData, ViewType};
//!
//! let data = RawData::new(
//!     vec![Iteration::new("iter-1", "Sprint 1", "2024-01-01", "2024-01-31", "p1")],
//!     Vec::new(),
//! );
//! let output = transform(ViewType::Iteration, &data, &TransformOptions::new());
//! assert_eq!(output.rows[0].id, "person_p1");
//! assert_eq!(output.rows[1].duration, 30);
//!
//! let filtered = filter_rows(&output.rows, &FilterConfig::new().with_person("p2"));
//! assert!(filtered.is_empty());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod options;
pub mod palette;
pub mod pipeline;
pub mod transform;

// Re-exports for convenience
pub use config::{GanttConfig, LazyLoad, Pagination, PaletteConfig, TimeScale};
pub use error::{ConfigError, GanttError};
pub use filter::{filter_rows, FilterConfig, FilterKey};
pub use input::{parse_raw_data, read_raw_data};
pub use options::{FilterOptions, OptionKind, SelectOption};
pub use palette::{StatusPalette, DEFAULT_STATUS_COLOR};
pub use pipeline::GanttPipeline;
pub use transform::{
    transform, transform_iterations, transform_requirements, Diagnostic, DiagnosticKind,
    TransformOptions, TransformOutput,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the engine
    pub use crate::{
        filter_rows, transform, FilterConfig, FilterKey, GanttConfig, GanttPipeline,
        TransformOptions, TransformOutput,
    };
    pub use gantt_model::{GanttRow, Iteration, RawData, Requirement, Task, ViewType};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
