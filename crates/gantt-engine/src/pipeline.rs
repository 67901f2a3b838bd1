//! Two-stage pipeline state
//!
//! Holds the configuration, the raw records and the last transform output.
//! Changes that affect the rows (data, view type) re-run the transform
//! immediately; filter changes only affect [`GanttPipeline::filtered_rows`],
//! which filters the cached rows on each call.

use crate::config::{GanttConfig, TimeScale};
use crate::error::ConfigError;
use crate::filter::{filter_rows, FilterConfig, FilterKey};
use crate::transform::{transform, Diagnostic, TransformOptions};
use gantt_model::{GanttRow, RawData, ViewType};
use std::borrow::Cow;

/// Transform + filter state for one chart
#[derive(Debug, Clone)]
pub struct GanttPipeline {
    config: GanttConfig,
    options: TransformOptions,
    raw: RawData,
    rows: Vec<GanttRow>,
    diagnostics: Vec<Diagnostic>,
    selected: Option<String>,
    generation: u64,
}

impl GanttPipeline {
    /// Create pipeline with no data
    #[must_use]
    pub fn new(config: GanttConfig) -> Self {
        let options = config.transform_options();
        Self {
            config,
            options,
            raw: RawData::default(),
            rows: Vec::new(),
            diagnostics: Vec::new(),
            selected: None,
            generation: 0,
        }
    }

    /// Create pipeline and transform `data` right away
    #[must_use]
    pub fn with_data(config: GanttConfig, data: RawData) -> Self {
        let mut pipeline = Self::new(config);
        pipeline.set_raw_data(data);
        pipeline
    }

    /// Current configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GanttConfig {
        &self.config
    }

    /// Raw records
    #[inline]
    #[must_use]
    pub fn raw_data(&self) -> &RawData {
        &self.raw
    }

    /// Current view type
    #[inline]
    #[must_use]
    pub fn view_type(&self) -> ViewType {
        self.config.view_type
    }

    /// Unfiltered rows from the last transform
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[GanttRow] {
        &self.rows
    }

    /// Diagnostics from the last transform
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of transforms run so far
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of raw records for the current view
    #[inline]
    #[must_use]
    pub fn current_view_len(&self) -> usize {
        self.raw.len_for(self.config.view_type)
    }

    /// Rows passing the active filters
    #[must_use]
    pub fn filtered_rows(&self) -> Cow<'_, [GanttRow]> {
        filter_rows(&self.rows, &self.config.filters)
    }

    /// Replace the raw records and re-run the transform
    pub fn set_raw_data(&mut self, data: RawData) {
        self.raw = data;
        self.refresh();
    }

    /// Switch view and re-run the transform
    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.config.view_type = view_type;
        self.refresh();
    }

    /// Change the time axis; rows are unaffected
    #[inline]
    pub fn set_time_scale(&mut self, time_scale: TimeScale) {
        self.config.time_scale = time_scale;
    }

    /// Merge `patch` into the active filters
    pub fn set_filters(&mut self, patch: &FilterConfig) {
        self.config.filters.merge(patch);
        tracing::debug!("Active filters: {}", self.config.filters.active_count());
    }

    /// Set one filter from its string form
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the value is not valid for `key`.
    pub fn set_filter(&mut self, key: FilterKey, value: &str) -> Result<(), ConfigError> {
        self.config.filters.set(key, value)
    }

    /// Clear one filter
    #[inline]
    pub fn remove_filter(&mut self, key: FilterKey) {
        self.config.filters.remove(key);
    }

    /// Clear every filter
    #[inline]
    pub fn clear_filters(&mut self) {
        self.config.filters.clear();
    }

    /// Select a row by id, or clear the selection
    #[inline]
    pub fn select_row(&mut self, id: Option<String>) {
        self.selected = id;
    }

    /// Selected row, if it still exists
    #[must_use]
    pub fn selected_row(&self) -> Option<&GanttRow> {
        let id = self.selected.as_deref()?;
        self.rows.iter().find(|row| row.id == id)
    }

    /// Re-run the transform for the current view and data
    pub fn refresh(&mut self) {
        let view = self.config.view_type;
        tracing::info!("Transforming data for {} view", view);
        let output = transform(view, &self.raw, &self.options);
        tracing::info!("Transform complete: {} rows", output.rows.len());
        self.rows = output.rows;
        self.diagnostics = output.diagnostics;
        self.generation += 1;
    }
}

impl Default for GanttPipeline {
    fn default() -> Self {
        Self::new(GanttConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantt_model::{Iteration, Requirement, SpaceType, Task};

    fn data() -> RawData {
        RawData::new(
            vec![
                Iteration::new("iter-1", "Sprint 1", "2024-01-01", "2024-01-31", "p1"),
                Iteration::new("iter-2", "Release 1.0", "2024-02-01", "2024-02-28", "p2"),
            ],
            vec![Requirement::new("req-1", "Export", "2024-01-01", "2024-01-20", "p1")
                .with_task(Task::new("task-1", "CSV", "2024-01-02", "2024-01-05", "p1"))],
        )
    }

    #[test]
    fn data_triggers_transform() {
        let pipeline = GanttPipeline::with_data(GanttConfig::new(), data());
        assert_eq!(pipeline.generation(), 1);
        assert_eq!(pipeline.rows().len(), 4);
        assert_eq!(pipeline.current_view_len(), 2);
    }

    #[test]
    fn view_switch_reruns_transform() {
        let mut pipeline = GanttPipeline::with_data(GanttConfig::new(), data());
        pipeline.set_view_type(ViewType::Requirement);

        assert_eq!(pipeline.generation(), 2);
        let ids: Vec<_> = pipeline.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["person_p1", "req-1", "task-1"]);
        assert_eq!(pipeline.current_view_len(), 1);
    }

    #[test]
    fn filter_changes_leave_rows_alone() {
        let mut pipeline = GanttPipeline::with_data(GanttConfig::new(), data());
        let before = pipeline.rows().to_vec();

        pipeline.set_filters(&FilterConfig::new().with_person("p2"));
        assert_eq!(pipeline.generation(), 1);
        assert_eq!(pipeline.rows(), before.as_slice());
        assert_eq!(pipeline.filtered_rows().len(), 2);

        pipeline.set_filters(&FilterConfig::new().with_project("release"));
        assert_eq!(pipeline.filtered_rows().len(), 1);

        pipeline.clear_filters();
        assert_eq!(pipeline.filtered_rows().len(), 4);
        assert_eq!(pipeline.generation(), 1);
    }

    #[test]
    fn filter_keys_by_name() {
        let mut pipeline = GanttPipeline::with_data(GanttConfig::new(), data());
        pipeline
            .set_filter(FilterKey::SpaceType, SpaceType::Team.as_str())
            .unwrap();
        assert!(pipeline.filtered_rows().is_empty());
        pipeline.remove_filter(FilterKey::SpaceType);
        assert_eq!(pipeline.filtered_rows().len(), 4);
    }

    #[test]
    fn time_scale_does_not_transform() {
        let mut pipeline = GanttPipeline::with_data(GanttConfig::new(), data());
        pipeline.set_time_scale(TimeScale::Week);
        assert_eq!(pipeline.config().time_scale, TimeScale::Week);
        assert_eq!(pipeline.generation(), 1);
    }

    #[test]
    fn selection_follows_rows() {
        let mut pipeline = GanttPipeline::with_data(GanttConfig::new(), data());
        pipeline.select_row(Some("iter-2".to_string()));
        assert_eq!(pipeline.selected_row().map(|r| r.text.as_str()), Some("Release 1.0"));

        pipeline.set_view_type(ViewType::Requirement);
        assert!(pipeline.selected_row().is_none());
    }

    #[test]
    fn config_options_reach_transform() {
        let config = GanttConfig::new().with_reference_year(2031);
        let pipeline = GanttPipeline::with_data(config, data());
        assert_eq!(pipeline.rows()[0].start_date, "2031-01-01");
    }
}
