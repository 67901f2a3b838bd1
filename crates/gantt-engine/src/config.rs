//! Chart configuration
//!
//! JSON or YAML, camelCase keys, every field optional. Pagination and lazy
//! loading settings are carried for the presentation layer and do not
//! influence the transform.

use crate::error::ConfigError;
use crate::filter::FilterConfig;
use crate::palette::StatusPalette;
use crate::transform::{TransformOptions, DEFAULT_GROUP_LABEL_PREFIX};
use gantt_model::{UnknownVariant, ViewType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Chart time axis granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeScale {
    /// Years
    Year,
    /// Quarters
    Quarter,
    /// Months
    #[default]
    Month,
    /// Weeks
    Week,
    /// Days
    Day,
}

impl TimeScale {
    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeScale::Year => "year",
            TimeScale::Quarter => "quarter",
            TimeScale::Month => "month",
            TimeScale::Week => "week",
            TimeScale::Day => "day",
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeScale {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(TimeScale::Year),
            "quarter" => Ok(TimeScale::Quarter),
            "month" => Ok(TimeScale::Month),
            "week" => Ok(TimeScale::Week),
            "day" => Ok(TimeScale::Day),
            other => Err(UnknownVariant::new("time scale", other)),
        }
    }
}

/// Paging of person groups (reserved)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
    pub total: u32,
    pub show_size_changer: bool,
    pub show_quick_jumper: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: 50,
            total: 0,
            show_size_changer: true,
            show_quick_jumper: true,
        }
    }
}

/// Incremental loading of person rows (reserved)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LazyLoad {
    pub expanded_nodes: Vec<String>,
    pub loaded_persons: Vec<String>,
    pub max_items_per_person: u32,
}

impl Default for LazyLoad {
    fn default() -> Self {
        Self {
            expanded_nodes: Vec::new(),
            loaded_persons: Vec::new(),
            max_items_per_person: 10,
        }
    }
}

/// Palette overrides on top of the built-in colors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Status → color
    pub colors: BTreeMap<String, String>,
    /// Color for statuses without an entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl PaletteConfig {
    /// Built-in palette with these overrides applied
    #[must_use]
    pub fn build(&self) -> StatusPalette {
        let palette = self
            .colors
            .iter()
            .fold(StatusPalette::new(), |palette, (status, color)| {
                palette.with_color(status.clone(), color.clone())
            });
        match &self.fallback {
            Some(color) => palette.with_fallback(color.clone()),
            None => palette,
        }
    }
}

/// Complete chart configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GanttConfig {
    /// Collection being charted
    pub view_type: ViewType,
    /// Time axis granularity
    pub time_scale: TimeScale,
    /// Active filters
    pub filters: FilterConfig,
    /// Render weekend columns
    pub show_weekends: bool,
    /// Highlight the critical path (reserved, no scheduling is done)
    pub show_critical_path: bool,
    /// Start with every group expanded
    pub expand_all: bool,
    /// Paging (reserved)
    pub pagination: Pagination,
    /// Lazy loading (reserved)
    pub lazy_load: LazyLoad,
    /// Year spanned by group rows; inferred when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
    /// Group row label prefix
    pub group_label_prefix: String,
    /// Status color overrides
    pub palette: PaletteConfig,
}

impl GanttConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With view type
    #[inline]
    #[must_use]
    pub fn with_view_type(mut self, view_type: ViewType) -> Self {
        self.view_type = view_type;
        self
    }

    /// With filters
    #[inline]
    #[must_use]
    pub fn with_filters(mut self, filters: FilterConfig) -> Self {
        self.filters = filters;
        self
    }

    /// With reference year
    #[inline]
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid
    #[inline]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::InvalidJson)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid
    #[inline]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(ConfigError::InvalidYaml)
    }

    /// Load from file; `.yml`/`.yaml` as YAML, anything else as JSON
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        let config = if is_yaml {
            Self::from_yaml(&text)?
        } else {
            Self::from_json(&text)?
        };
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::InvalidJson)
    }

    /// Transform options derived from this configuration
    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        let options = TransformOptions::new()
            .with_group_label_prefix(self.group_label_prefix.clone())
            .with_palette(self.palette.build());
        match self.reference_year {
            Some(year) => options.with_reference_year(year),
            None => options,
        }
    }
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            view_type: ViewType::Iteration,
            time_scale: TimeScale::Month,
            filters: FilterConfig::default(),
            show_weekends: false,
            show_critical_path: false,
            expand_all: false,
            pagination: Pagination::default(),
            lazy_load: LazyLoad::default(),
            reference_year: None,
            group_label_prefix: DEFAULT_GROUP_LABEL_PREFIX.to_string(),
            palette: PaletteConfig::default(),
        }
    }
}
