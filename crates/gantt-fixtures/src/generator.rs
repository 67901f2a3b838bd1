//! Seeded mock data
//!
//! Produces a realistic [`RawData`] set: a handful of persons, each owning a
//! few iterations and requirements, every requirement carrying one to three
//! tasks. The same seed always yields the same data.

use chrono::{Duration, NaiveDate};
use gantt_model::{
    Iteration, IterationStatus, PersonRole, Priority, RawData, Requirement, RequirementStatus,
    SpaceType, Task, TaskStatus,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

const NAMES: [&str; 8] = [
    "Alice", "Bruno", "Chen", "Dana", "Emeka", "Farah", "Goran", "Hana",
];

const DEPARTMENTS: [&str; 4] = ["rd", "product", "qa", "ops"];

const ITERATION_NAMES: [&str; 12] = [
    "Sprint 2024.1",
    "Sprint 2024.2",
    "Sprint 2024.3",
    "Sprint 2024.4",
    "Bug Fix 2024.1",
    "Bug Fix 2024.2",
    "Release 1.0",
    "Release 1.1",
    "Feature Sprint Q1",
    "Feature Sprint Q2",
    "Hotfix 2024.1",
    "Hotfix 2024.2",
];

const REQUIREMENT_NAMES: [&str; 12] = [
    "Gantt component",
    "Filter panel",
    "Time scale switch",
    "Detail dialog",
    "Access control",
    "Data export",
    "Mobile layout",
    "Performance tuning",
    "Visual polish",
    "Localization",
    "Usage statistics",
    "Report builder",
];

const PROJECTS: [&str; 3] = ["Gantt Project", "Management System", "Mobile App"];

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of persons
    pub persons: usize,
    /// Iterations owned by each person
    ///
    /// Reversed bounds such as `5..=2` are swapped by [`MockGenerator::new`].
    pub iterations_per_person: RangeInclusive<usize>,
    /// Requirements owned by each person
    pub requirements_per_person: RangeInclusive<usize>,
    /// Tasks nested under each requirement
    pub tasks_per_requirement: RangeInclusive<usize>,
    /// Calendar year the dates fall in
    pub year: i32,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            persons: NAMES.len(),
            iterations_per_person: 2..=5,
            requirements_per_person: 3..=7,
            tasks_per_requirement: 1..=3,
            year: 2024,
        }
    }
}

impl MockConfig {
    /// With seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// With person count
    #[inline]
    #[must_use]
    pub fn with_persons(mut self, persons: usize) -> Self {
        self.persons = persons;
        self
    }

    /// With calendar year
    #[inline]
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }
}

/// Person owning generated records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPerson {
    pub id: String,
    pub name: String,
    pub department: String,
    pub roles: Vec<PersonRole>,
}

/// Seeded record generator
#[derive(Debug)]
pub struct MockGenerator {
    config: MockConfig,
    rng: StdRng,
    year_start: NaiveDate,
    year_end: NaiveDate,
}

impl MockGenerator {
    /// Create generator
    ///
    /// Count ranges given with reversed bounds are swapped so none is empty.
    #[must_use]
    pub fn new(mut config: MockConfig) -> Self {
        config.iterations_per_person = ordered(config.iterations_per_person);
        config.requirements_per_person = ordered(config.requirements_per_person);
        config.tasks_per_requirement = ordered(config.tasks_per_requirement);
        let rng = StdRng::seed_from_u64(config.seed);
        let year_start = NaiveDate::from_ymd_opt(config.year, 1, 1).unwrap_or_default();
        let year_end = NaiveDate::from_ymd_opt(config.year, 12, 31).unwrap_or(year_start);
        Self {
            config,
            rng,
            year_start,
            year_end,
        }
    }

    /// Generator settings
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Generate persons, then their iterations and requirements
    pub fn generate(&mut self) -> RawData {
        let persons = self.persons();
        let iterations = self.iterations(&persons);
        let requirements = self.requirements(&persons, &iterations);
        RawData::new(iterations, requirements)
    }

    /// Generate the person list
    ///
    /// Names repeat with a numeric suffix once the built-in list runs out.
    pub fn persons(&mut self) -> Vec<MockPerson> {
        let roles = PersonRole::KNOWN;
        (0..self.config.persons)
            .map(|index| {
                let base = NAMES[index % NAMES.len()];
                let name = match index / NAMES.len() {
                    0 => base.to_string(),
                    round => format!("{base} {}", round + 1),
                };
                let role_count = if self.rng.random_bool(0.5) { 1 } else { 2 };
                MockPerson {
                    id: format!("person-{}", index + 1),
                    name,
                    department: DEPARTMENTS[index % DEPARTMENTS.len()].to_string(),
                    roles: (0..role_count)
                        .map(|offset| roles[(index + offset) % roles.len()].clone())
                        .collect(),
                }
            })
            .collect()
    }

    fn iterations(&mut self, persons: &[MockPerson]) -> Vec<Iteration> {
        let mut iterations = Vec::new();
        for person in persons {
            let count = self.rng.random_range(self.config.iterations_per_person.clone());
            for n in 1..=count {
                let id = format!("iteration-{}-{n}", person.id);
                let (start, end) = self.date_range();
                let project = self.pick(&PROJECTS);
                let space = *self.pick(&SpaceType::ALL);

                let mut iteration = Iteration::new(
                    id.clone(),
                    *self.pick(&ITERATION_NAMES),
                    start,
                    end,
                    person.id.clone(),
                )
                .with_status(self.pick(IterationStatus::KNOWN).clone())
                .with_role(self.pick(&person.roles).clone())
                .with_space(space, *project)
                .with_counts(self.rng.random_range(2..=16), self.rng.random_range(5..=24))
                .with_url(format!("https://example.com/iterations/{id}"));
                iteration.description = Some(format!("Iteration owned by {}", person.name));
                iteration.space_name = Some(format!("{project} Space"));
                iteration.associated_persons = Some(self.rng.random_range(2..=6));
                iterations.push(iteration);
            }
        }
        iterations
    }

    fn requirements(
        &mut self,
        persons: &[MockPerson],
        iterations: &[Iteration],
    ) -> Vec<Requirement> {
        let mut requirements = Vec::new();
        for person in persons {
            let related = iterations.iter().find(|it| it.person_id == person.id);
            let count = self.rng.random_range(self.config.requirements_per_person.clone());

            for n in 1..=count {
                let id = format!("requirement-{}-{n}", person.id);
                let (start, end) = self.date_range();
                let mut requirement = Requirement::new(
                    id.clone(),
                    *self.pick(&REQUIREMENT_NAMES),
                    start,
                    end,
                    person.id.clone(),
                )
                .with_status(self.pick(RequirementStatus::KNOWN).clone())
                .with_priority(self.pick(Priority::KNOWN).clone())
                .with_role(self.pick(&person.roles).clone())
                .with_url(format!("https://example.com/requirements/{id}"));
                requirement.description = Some(format!("Requirement owned by {}", person.name));
                requirement.space_type = Some(
                    related
                        .and_then(|it| it.space_type)
                        .unwrap_or(SpaceType::Project),
                );
                requirement.space_name = related.and_then(|it| it.space_name.clone());
                requirement.project_name = related.and_then(|it| it.project_name.clone());
                if let Some(iteration) = related {
                    requirement =
                        requirement.in_iteration(iteration.id.clone(), iteration.name.clone());
                }

                let tasks = self.rng.random_range(self.config.tasks_per_requirement.clone());
                for t in 1..=tasks {
                    let task = self.task(&requirement, person, t);
                    requirement = requirement.with_task(task);
                }
                requirements.push(requirement);
            }
        }
        requirements
    }

    fn task(&mut self, requirement: &Requirement, person: &MockPerson, n: usize) -> Task {
        let id = format!("task-{}-{n}", requirement.id);
        let req_start = parse_date(&requirement.start_date).unwrap_or(self.year_start);
        let req_end = parse_date(&requirement.end_date).unwrap_or(self.year_end);
        let start = self.date_between(req_start, req_end);
        let end = self.date_between(start, req_end);

        let mut task = Task::new(
            id.clone(),
            format!("{} - part {n}", requirement.name),
            format_date(start),
            format_date(end),
            person.id.clone(),
        )
        .with_status(self.pick(TaskStatus::KNOWN).clone())
        .with_role(self.pick(&person.roles).clone())
        .with_hours(
            f64::from(self.rng.random_range(8..48_u32)),
            f64::from(self.rng.random_range(5..40_u32)),
        )
        .under(requirement)
        .with_url(format!("https://example.com/tasks/{id}"));
        task.description = Some(format!("Implementation work for {}", requirement.name));
        task
    }

    /// Start in the first five months, end between start and year end
    fn date_range(&mut self) -> (String, String) {
        let cutoff = NaiveDate::from_ymd_opt(self.config.year, 6, 1).unwrap_or(self.year_end);
        let start = self.date_between(self.year_start, cutoff);
        let end = self.date_between(start, self.year_end);
        (format_date(start), format_date(end))
    }

    fn date_between(&mut self, from: NaiveDate, to: NaiveDate) -> NaiveDate {
        let span = (to - from).num_days().max(0);
        from + Duration::days(self.rng.random_range(0..=span))
    }

    /// Callers only pass non-empty lists
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn ordered(range: RangeInclusive<usize>) -> RangeInclusive<usize> {
    let (low, high) = range.into_inner();
    low.min(high)..=low.max(high)
}
