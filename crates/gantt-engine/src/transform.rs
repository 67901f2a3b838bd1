//! Hierarchy to timeline transform
//!
//! Flattens iterations, or requirements with their nested tasks, into chart
//! rows grouped by the owning person:
//!
//! ```text
//! person_p1                (group, parent "0")
//! ├── req-1                (item, parent person_p1)
//! │   ├── task-1           (item, parent req-1)
//! │   └── task-2
//! └── req-2
//! person_p2
//! └── ...
//! ```
//!
//! The transform never fails. Records it cannot place are skipped or
//! defaulted, and each such decision is returned as a [`Diagnostic`].

use crate::palette::StatusPalette;
use chrono::Datelike;
use gantt_model::dates::{self, DateError};
use gantt_model::{
    GanttRow, Iteration, PersonRole, RawData, Requirement, RowKind, Task, ViewType, WorkItem,
    WorkItemType, ROOT_PARENT,
};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;

/// Year used for group rows when nothing better is known
pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;

/// Duration reported by every group row
pub const GROUP_DURATION_DAYS: u32 = 365;

/// Default prefix of group row labels
pub const DEFAULT_GROUP_LABEL_PREFIX: &str = "Person ";

const GROUP_STATUS: &str = "active";

/// Knobs for the transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Year spanned by group rows; inferred from the data when `None`
    pub reference_year: Option<i32>,
    /// Text placed before the person id in group row labels
    pub group_label_prefix: String,
    /// Status colors
    pub palette: StatusPalette,
}

impl TransformOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fixed reference year
    #[inline]
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// With group label prefix
    #[inline]
    #[must_use]
    pub fn with_group_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.group_label_prefix = prefix.into();
        self
    }

    /// With palette
    #[inline]
    #[must_use]
    pub fn with_palette(mut self, palette: StatusPalette) -> Self {
        self.palette = palette;
        self
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            reference_year: None,
            group_label_prefix: DEFAULT_GROUP_LABEL_PREFIX.to_string(),
            palette: StatusPalette::default(),
        }
    }
}

/// What the transform did with a record it could not take as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Record had no id; skipped
    MissingId,
    /// Record had no person id; skipped with its nested tasks
    MissingPersonId,
    /// Row id already used earlier in the sequence; skipped
    DuplicateId,
    /// A date did not parse; duration set to 0
    InvalidDate(DateError),
    /// End date before start date; duration uses the distance
    ReversedRange,
    /// Nested task had no person id; took the requirement's person
    DefaultedPerson,
}

impl DiagnosticKind {
    /// Whether the record was left out of the output
    #[inline]
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::MissingId | Self::MissingPersonId | Self::DuplicateId
        )
    }
}

/// One degraded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What happened
    pub kind: DiagnosticKind,
    /// Kind of the record involved
    pub work_item: WorkItemType,
    /// Id of the record involved (may be empty)
    pub record_id: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, item: &WorkItem<'_>) -> Self {
        Self {
            kind,
            work_item: item.work_item_type(),
            record_id: item.id().to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = if self.record_id.is_empty() {
            "<no id>"
        } else {
            &self.record_id
        };
        match &self.kind {
            DiagnosticKind::MissingId => write!(f, "{} without id skipped", self.work_item),
            DiagnosticKind::MissingPersonId => {
                write!(f, "{} {id} has no person id; skipped", self.work_item)
            }
            DiagnosticKind::DuplicateId => {
                write!(f, "{} {id} repeats an earlier row id; skipped", self.work_item)
            }
            DiagnosticKind::InvalidDate(err) => {
                write!(f, "{} {id}: {err}; duration set to 0", self.work_item)
            }
            DiagnosticKind::ReversedRange => {
                write!(f, "{} {id} ends before it starts", self.work_item)
            }
            DiagnosticKind::DefaultedPerson => {
                write!(f, "{} {id} has no person id; using requirement's", self.work_item)
            }
        }
    }
}

/// Rows plus the diagnostics produced while building them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    /// Flat, parent-linked rows in render order
    pub rows: Vec<GanttRow>,
    /// Records that were skipped or degraded
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformOutput {
    /// Number of group rows
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_group()).count()
    }

    /// Number of item rows
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.rows.len() - self.group_count()
    }

    /// Diagnostics that removed a record
    pub fn skipped(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind.is_skip())
    }
}

/// Transform the collection selected by `view`
#[must_use]
pub fn transform(view: ViewType, data: &RawData, options: &TransformOptions) -> TransformOutput {
    match view {
        ViewType::Iteration => transform_iterations(&data.iterations, options),
        ViewType::Requirement => transform_requirements(&data.requirements, options),
    }
}

/// Two-level tree: person → iteration
#[must_use]
pub fn transform_iterations(iterations: &[Iteration], options: &TransformOptions) -> TransformOutput {
    tracing::debug!("Transforming {} iterations", iterations.len());
    build(
        WorkItemType::Iteration,
        iterations.iter().map(WorkItem::from),
        options,
    )
}

/// Three-level tree: person → requirement → task
#[must_use]
pub fn transform_requirements(
    requirements: &[Requirement],
    options: &TransformOptions,
) -> TransformOutput {
    tracing::debug!("Transforming {} requirements", requirements.len());
    build(
        WorkItemType::Requirement,
        requirements.iter().map(WorkItem::from),
        options,
    )
}

fn build<'a>(
    group_type: WorkItemType,
    items: impl Iterator<Item = WorkItem<'a>>,
    options: &TransformOptions,
) -> TransformOutput {
    let mut diagnostics = Vec::new();
    let groups = group_by_person(items, &mut diagnostics);
    let year = options
        .reference_year
        .unwrap_or_else(|| infer_reference_year(groups.values().flatten()));

    let mut builder = RowBuilder::new(options, year, diagnostics, groups.keys().copied());

    for (person_id, items) in &groups {
        let Some(first) = items.first() else {
            continue;
        };
        let group_id = builder.push_group(person_id, first.person_role(), group_type);

        for item in items {
            let emitted = builder.push_item(*item, &group_id, None);
            match item {
                WorkItem::Requirement(requirement) if emitted => {
                    for task in requirement.tasks() {
                        builder.push_task(task, requirement);
                    }
                }
                WorkItem::Iteration(_) | WorkItem::Requirement(_) | WorkItem::Task(_) => {}
            }
        }
    }

    let output = builder.finish();
    tracing::debug!(
        "Transform produced {} rows ({} groups), {} diagnostics",
        output.rows.len(),
        output.group_count(),
        output.diagnostics.len()
    );
    output
}

/// Partition by person id in first-seen order
fn group_by_person<'a>(
    items: impl Iterator<Item = WorkItem<'a>>,
    diagnostics: &mut Vec<Diagnostic>,
) -> IndexMap<&'a str, Vec<WorkItem<'a>>> {
    let mut groups: IndexMap<&'a str, Vec<WorkItem<'a>>> = IndexMap::new();

    for item in items {
        if item.id().is_empty() {
            diagnostics.push(Diagnostic::new(DiagnosticKind::MissingId, &item));
            continue;
        }
        if item.person_id().is_empty() {
            diagnostics.push(Diagnostic::new(DiagnosticKind::MissingPersonId, &item));
            continue;
        }
        groups.entry(item.person_id()).or_default().push(item);
    }

    groups
}

/// Year of the earliest parseable start date
fn infer_reference_year<'a, 'b: 'a>(items: impl Iterator<Item = &'a WorkItem<'b>>) -> i32 {
    items
        .filter_map(|item| dates::parse_date(item.dates().0).ok())
        .min()
        .map_or(DEFAULT_REFERENCE_YEAR, |date| date.year())
}

/// Percentage of completed work, rounded and clamped to 0..=100
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn progress(item: &WorkItem<'_>) -> u8 {
    match item.work_counts() {
        Some((completed, total)) if total > 0 => {
            let percent = (f64::from(completed) / f64::from(total) * 100.0).round();
            percent.clamp(0.0, 100.0) as u8
        }
        _ => 0,
    }
}

struct RowBuilder<'o> {
    options: &'o TransformOptions,
    year_start: String,
    year_end: String,
    rows: Vec<GanttRow>,
    seen: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'o> RowBuilder<'o> {
    fn new<'p>(
        options: &'o TransformOptions,
        year: i32,
        diagnostics: Vec<Diagnostic>,
        persons: impl Iterator<Item = &'p str>,
    ) -> Self {
        let (year_start, year_end) = dates::year_bounds(year);
        // Group ids are claimed up front so no record row can take one.
        let seen = persons.map(GanttRow::group_id).collect();
        Self {
            options,
            year_start,
            year_end,
            rows: Vec::new(),
            seen,
            diagnostics,
        }
    }

    fn push_group(
        &mut self,
        person_id: &str,
        role: &PersonRole,
        group_type: WorkItemType,
    ) -> String {
        let id = GanttRow::group_id(person_id);
        self.rows.push(GanttRow {
            id: id.clone(),
            text: format!("{}{person_id}", self.options.group_label_prefix),
            start_date: self.year_start.clone(),
            end_date: self.year_end.clone(),
            duration: GROUP_DURATION_DAYS,
            progress: 0,
            parent: ROOT_PARENT.to_string(),
            kind: RowKind::Group,
            work_item_type: Some(group_type),
            status: GROUP_STATUS.to_string(),
            person_id: person_id.to_string(),
            person_name: person_id.to_string(),
            person_role: role.clone(),
            color: None,
            url: None,
            readonly: Some(true),
        });
        id
    }

    fn push_task(&mut self, task: &Task, requirement: &Requirement) {
        let item = WorkItem::Task(task);
        if task.id.is_empty() {
            self.diagnostics
                .push(Diagnostic::new(DiagnosticKind::MissingId, &item));
            return;
        }
        let owner = if task.person_id.is_empty() {
            self.diagnostics
                .push(Diagnostic::new(DiagnosticKind::DefaultedPerson, &item));
            Some((requirement.person_id.as_str(), &requirement.person_role))
        } else {
            None
        };
        self.push_item(item, &requirement.id, owner);
    }

    /// Returns whether a row was emitted
    fn push_item(
        &mut self,
        item: WorkItem<'_>,
        parent: &str,
        owner: Option<(&str, &PersonRole)>,
    ) -> bool {
        if !self.seen.insert(item.id().to_string()) {
            self.diagnostics
                .push(Diagnostic::new(DiagnosticKind::DuplicateId, &item));
            return false;
        }

        let (start, end) = item.dates();
        let duration = match dates::span(start, end) {
            Ok(span) => {
                if span.reversed {
                    self.diagnostics
                        .push(Diagnostic::new(DiagnosticKind::ReversedRange, &item));
                }
                span.days
            }
            Err(err) => {
                self.diagnostics
                    .push(Diagnostic::new(DiagnosticKind::InvalidDate(err), &item));
                0
            }
        };

        let (person_id, role) = owner.unwrap_or((item.person_id(), item.person_role()));
        let status = item.status();

        self.rows.push(GanttRow {
            id: item.id().to_string(),
            text: item.name().to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            duration,
            progress: progress(&item),
            parent: parent.to_string(),
            kind: RowKind::Item,
            work_item_type: Some(item.work_item_type()),
            status: status.to_string(),
            person_id: person_id.to_string(),
            person_name: person_id.to_string(),
            person_role: role.clone(),
            color: Some(self.options.palette.color_for(status).to_string()),
            url: item.url().map(str::to_string),
            readonly: None,
        });
        true
    }

    fn finish(self) -> TransformOutput {
        for diagnostic in &self.diagnostics {
            tracing::warn!("{}", diagnostic);
        }
        TransformOutput {
            rows: self.rows,
            diagnostics: self.diagnostics,
        }
    }
}
