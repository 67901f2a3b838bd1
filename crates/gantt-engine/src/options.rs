//! Filter option catalogue
//!
//! The lists behind each filter control. Static lists come seeded; persons
//! and iteration names are collected from a transformed row sequence.

use gantt_model::{GanttRow, PersonRole, SpaceType, UnknownVariant, WorkItemType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One selectable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label
    pub label: String,
    /// Value written into the filter
    pub value: String,
    /// Greyed out in the control
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    /// Number of rows carrying this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl SelectOption {
    /// Create option
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
            count: None,
        }
    }

    /// With row count
    #[inline]
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Which option list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Departments
    Departments,
    /// Projects
    Projects,
    /// Space types
    SpaceTypes,
    /// Iteration names
    Iterations,
    /// Person roles
    PersonTypes,
    /// Persons
    Persons,
}

impl FromStr for OptionKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "departments" => Ok(OptionKind::Departments),
            "projects" => Ok(OptionKind::Projects),
            "spaceTypes" | "space-types" => Ok(OptionKind::SpaceTypes),
            "iterations" => Ok(OptionKind::Iterations),
            "personTypes" | "person-types" => Ok(OptionKind::PersonTypes),
            "persons" => Ok(OptionKind::Persons),
            other => Err(UnknownVariant::new("option list", other)),
        }
    }
}

/// All option lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    pub departments: Vec<SelectOption>,
    pub projects: Vec<SelectOption>,
    pub space_types: Vec<SelectOption>,
    pub iterations: Vec<SelectOption>,
    pub person_types: Vec<SelectOption>,
    pub persons: Vec<SelectOption>,
}

impl FilterOptions {
    /// Seeded static lists; persons and iterations start empty
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            departments: vec![
                SelectOption::new("R&D", "rd"),
                SelectOption::new("Product", "product"),
                SelectOption::new("QA", "qa"),
                SelectOption::new("Operations", "ops"),
            ],
            projects: vec![
                SelectOption::new("Gantt Project", "gantt-project"),
                SelectOption::new("Management System", "management-system"),
                SelectOption::new("Mobile App", "mobile-app"),
            ],
            space_types: SpaceType::ALL
                .iter()
                .map(|space| SelectOption::new(space_label(*space), space.as_str()))
                .collect(),
            iterations: Vec::new(),
            person_types: PersonRole::KNOWN
                .iter()
                .map(|role| SelectOption::new(role_label(role), role.as_str()))
                .collect(),
            persons: Vec::new(),
        }
    }

    /// One list
    #[must_use]
    pub fn get(&self, kind: OptionKind) -> &[SelectOption] {
        match kind {
            OptionKind::Departments => &self.departments,
            OptionKind::Projects => &self.projects,
            OptionKind::SpaceTypes => &self.space_types,
            OptionKind::Iterations => &self.iterations,
            OptionKind::PersonTypes => &self.person_types,
            OptionKind::Persons => &self.persons,
        }
    }

    /// Replace one list
    pub fn set(&mut self, kind: OptionKind, options: Vec<SelectOption>) {
        let slot = match kind {
            OptionKind::Departments => &mut self.departments,
            OptionKind::Projects => &mut self.projects,
            OptionKind::SpaceTypes => &mut self.space_types,
            OptionKind::Iterations => &mut self.iterations,
            OptionKind::PersonTypes => &mut self.person_types,
            OptionKind::Persons => &mut self.persons,
        };
        *slot = options;
    }

    /// Options of `kind` whose label contains `search`, ignoring case
    #[must_use]
    pub fn search(&self, kind: OptionKind, search: &str) -> Vec<&SelectOption> {
        let list = self.get(kind);
        if search.is_empty() {
            return list.iter().collect();
        }
        let needle = search.to_lowercase();
        list.iter()
            .filter(|option| option.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Fill persons and iterations from transformed rows
    ///
    /// Persons come from item rows in first-seen order, counted per person.
    /// Iterations are the distinct texts of iteration rows.
    pub fn populate_from_rows(&mut self, rows: &[GanttRow]) {
        let mut persons: IndexMap<&str, (&str, usize)> = IndexMap::new();
        let mut iterations: IndexMap<&str, usize> = IndexMap::new();

        for row in rows.iter().filter(|row| !row.is_group()) {
            persons
                .entry(row.person_id.as_str())
                .or_insert((row.person_name.as_str(), 0))
                .1 += 1;
            if row.work_item_type == Some(WorkItemType::Iteration) {
                *iterations.entry(row.text.as_str()).or_insert(0) += 1;
            }
        }

        self.persons = persons
            .into_iter()
            .map(|(id, (name, count))| SelectOption::new(name, id).with_count(count))
            .collect();
        self.iterations = iterations
            .into_iter()
            .map(|(name, count)| SelectOption::new(name, name).with_count(count))
            .collect();
    }
}

fn space_label(space: SpaceType) -> &'static str {
    match space {
        SpaceType::Project => "Project Space",
        SpaceType::Product => "Product Space",
        SpaceType::Team => "Team Space",
    }
}

fn role_label(role: &PersonRole) -> &str {
    match role {
        PersonRole::Developer => "Developer",
        PersonRole::Tester => "Tester",
        PersonRole::Product => "Product Manager",
        PersonRole::Owner => "Owner",
        PersonRole::Creator => "Creator",
        PersonRole::Other(raw) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{transform_iterations, TransformOptions};
    use gantt_model::Iteration;

    #[test]
    fn defaults_seed_static_lists() {
        let options = FilterOptions::defaults();
        assert_eq!(options.get(OptionKind::Departments).len(), 4);
        assert_eq!(options.get(OptionKind::SpaceTypes)[2].value, "team");
        assert_eq!(options.get(OptionKind::PersonTypes).len(), 5);
        assert!(options.get(OptionKind::Persons).is_empty());
    }

    #[test]
    fn search_by_label() {
        let options = FilterOptions::defaults();
        let hits: Vec<_> = options
            .search(OptionKind::Projects, "SYSTEM")
            .into_iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(hits, vec!["management-system"]);
        assert_eq!(options.search(OptionKind::Projects, "").len(), 3);
        assert!(options.search(OptionKind::Projects, "nothing").is_empty());
    }

    #[test]
    fn set_replaces_list() {
        let mut options = FilterOptions::defaults();
        options.set(OptionKind::Departments, vec![SelectOption::new("Design", "design")]);
        assert_eq!(options.departments.len(), 1);
    }

    #[test]
    fn populate_from_transformed_rows() {
        let iterations = vec![
            Iteration::new("a", "Sprint 1", "2024-01-01", "2024-01-10", "p1"),
            Iteration::new("b", "Sprint 2", "2024-01-01", "2024-01-10", "p2"),
            Iteration::new("c", "Sprint 1", "2024-02-01", "2024-02-10", "p1"),
        ];
        let output = transform_iterations(&iterations, &TransformOptions::new());

        let mut options = FilterOptions::defaults();
        options.populate_from_rows(&output.rows);

        assert_eq!(
            options.persons,
            vec![
                SelectOption::new("p1", "p1").with_count(2),
                SelectOption::new("p2", "p2").with_count(1),
            ]
        );
        assert_eq!(
            options.iterations,
            vec![
                SelectOption::new("Sprint 1", "Sprint 1").with_count(2),
                SelectOption::new("Sprint 2", "Sprint 2").with_count(1),
            ]
        );
    }

    #[test]
    fn option_kind_parses() {
        assert_eq!("personTypes".parse::<OptionKind>().unwrap(), OptionKind::PersonTypes);
        assert_eq!("space-types".parse::<OptionKind>().unwrap(), OptionKind::SpaceTypes);
        assert!("colours".parse::<OptionKind>().is_err());
    }
}
