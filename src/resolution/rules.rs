//! Subordinate rule tables.
//!
//! A [`SubordinateRule`] maps one exact manager title to the criteria that
//! select that manager's reports: a crew scope, an optional `gruppe` filter
//! and a [`PositionSelector`] over the typed position taxonomy.
//!
//! Two tables are kept: the direct table answers "who reports to this
//! person", the transitive table answers "whose records does this senior role
//! aggregate". They intentionally disagree in places; every rule carries a
//! `rationale` so an edit does not "fix" an asymmetry that is wanted.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::directory::Directory;
use crate::error::{HierarchyError, HierarchyResult};
use crate::models::{
    Department, Employee, EmployeeId, Gruppe, Level, Position, PositionCatalog, Shift,
};

/// Which crews a rule draws subordinates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewScope {
    /// Any crew, including none.
    #[default]
    Any,
    /// Only the manager's own crew. A manager without a crew gets nobody.
    SameCrew,
    /// Any real crew; employees with the `---` placeholder are skipped.
    AssignedCrew,
}

/// Field-wise match on the position taxonomy.
///
/// Every non-empty list must contain the position's value; empty lists match
/// anything. `exclude_departments` removes matches afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxonomyMatch {
    /// Allowed departments.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Allowed levels.
    #[serde(default)]
    pub levels: Vec<Level>,
    /// Allowed shift models.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Departments that never match.
    #[serde(default)]
    pub exclude_departments: Vec<Department>,
}

impl TaxonomyMatch {
    /// Returns true if the position satisfies every constraint.
    pub fn matches(&self, position: &Position) -> bool {
        if let Some(department) = position.department {
            if self.exclude_departments.contains(&department) {
                return false;
            }
        }
        let department_ok = self.departments.is_empty()
            || position
                .department
                .is_some_and(|d| self.departments.contains(&d));
        let level_ok = self.levels.is_empty() || self.levels.contains(&position.level);
        let shift_ok = self.shifts.is_empty()
            || position.shift.is_some_and(|s| self.shifts.contains(&s));
        department_ok && level_ok && shift_ok
    }
}

/// Selects positions either by name or by taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionSelector {
    /// A closed list of exact titles.
    Titles {
        /// The titles that match.
        titles: Vec<String>,
    },
    /// A match on typed position fields.
    Taxonomy(TaxonomyMatch),
    /// Matches if any inner selector matches.
    AnyOf {
        /// The alternatives.
        selectors: Vec<PositionSelector>,
    },
}

impl PositionSelector {
    /// Returns true if the title is selected.
    pub fn matches(&self, catalog: &PositionCatalog, title: &str) -> bool {
        match self {
            PositionSelector::Titles { titles } => titles.iter().any(|t| t == title),
            PositionSelector::Taxonomy(taxonomy) => taxonomy.matches(&catalog.resolve(title)),
            PositionSelector::AnyOf { selectors } => {
                selectors.iter().any(|s| s.matches(catalog, title))
            }
        }
    }
}

/// One row of a rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubordinateRule {
    /// The exact manager title this rule applies to.
    pub manager: String,
    /// Crew scope of the subordinates.
    #[serde(default)]
    pub crew: CrewScope,
    /// Restricts subordinates to these groups; empty means any.
    #[serde(default)]
    pub gruppen: Vec<Gruppe>,
    /// Which subordinate positions are selected.
    pub select: PositionSelector,
    /// Why the rule looks the way it does.
    #[serde(default)]
    pub rationale: String,
}

impl SubordinateRule {
    /// Evaluates the rule for `manager` against the directory.
    ///
    /// Only active employees are returned. The manager is not removed here;
    /// callers apply self-exclusion after folding in delegation.
    pub fn evaluate<D: Directory + ?Sized>(
        &self,
        directory: &D,
        catalog: &PositionCatalog,
        manager: &Employee,
    ) -> BTreeSet<EmployeeId> {
        let matches_title = |title: &str| self.select.matches(catalog, title);

        let candidates = match (self.crew, self.gruppen.is_empty(), &self.select) {
            (CrewScope::SameCrew, _, _) if !manager.crew.is_assigned() => Vec::new(),
            (CrewScope::SameCrew, true, _) => {
                directory.find_by_crew_and_positions(&manager.crew, &matches_title)
            }
            (CrewScope::Any, true, PositionSelector::Titles { titles }) => {
                directory.find_by_positions(titles)
            }
            _ => directory.find_where(&|employee| self.admits(catalog, manager, employee)),
        };

        candidates
            .into_iter()
            .filter(|id| directory.employee(*id).is_some_and(|e| e.is_active()))
            .collect()
    }

    fn admits(&self, catalog: &PositionCatalog, manager: &Employee, employee: &Employee) -> bool {
        let crew_ok = match self.crew {
            CrewScope::Any => true,
            CrewScope::SameCrew => manager.crew.is_assigned() && employee.crew == manager.crew,
            CrewScope::AssignedCrew => employee.crew.is_assigned(),
        };
        let gruppe_ok = self.gruppen.is_empty() || self.gruppen.contains(&employee.gruppe);
        crew_ok && gruppe_ok && self.select.matches(catalog, &employee.position)
    }
}

/// A named rule table keyed by exact manager title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    name: String,
    rules: HashMap<String, SubordinateRule>,
}

impl RuleSet {
    /// Builds a table, rejecting two rules for the same manager title.
    pub fn new(name: impl Into<String>, rules: Vec<SubordinateRule>) -> HierarchyResult<Self> {
        let name = name.into();
        let mut by_manager = HashMap::with_capacity(rules.len());
        for rule in rules {
            let manager = rule.manager.trim().to_string();
            if by_manager.contains_key(&manager) {
                return Err(HierarchyError::DuplicateRule {
                    table: name,
                    position: manager,
                });
            }
            by_manager.insert(manager, rule);
        }
        Ok(Self {
            name,
            rules: by_manager,
        })
    }

    /// An empty table.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: HashMap::new(),
        }
    }

    /// The table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule for an exact manager title.
    pub fn rule_for(&self, title: &str) -> Option<&SubordinateRule> {
        self.rules.get(title.trim())
    }

    /// Returns true if the title has a rule.
    pub fn contains(&self, title: &str) -> bool {
        self.rules.contains_key(title.trim())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
