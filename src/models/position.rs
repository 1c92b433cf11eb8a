//! Typed position taxonomy.
//!
//! Job titles are free text drawn from a closed vocabulary. Rule tables key on
//! the structured fields of a [`Position`] (department, level, shift) rather
//! than on substrings of the title, so a renamed title only needs a catalog
//! entry instead of an audit of every pattern that might have matched it.
//!
//! Titles are resolved in two steps:
//!
//! 1. an exact entry in the [`PositionCatalog`] (irregular titles such as
//!    `"Schichtmeister"` or `"Werkleiter"`);
//! 2. otherwise the suffix conventions
//!    `[<Shift> - ]<Department>[ - Stv.][ | TL| AL]`.
//!
//! A title that fits neither still resolves, with `department` set to `None`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Department a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    /// Production lines.
    Produktion,
    /// Packaging.
    Verpackung,
    /// Mechanical maintenance.
    Mechanik,
    /// Electrical maintenance.
    Elektrik,
    /// Engineering (umbrella over mechanical and electrical).
    Technik,
    /// Logistics and warehouse.
    Logistik,
    /// Quality assurance.
    Qualitaet,
    /// Human resources.
    Personal,
    /// Environment, health and safety.
    Arbeitssicherheit,
    /// Information technology.
    It,
    /// General administration.
    Verwaltung,
    /// Lean / continuous improvement.
    Lean,
    /// Reception desk.
    Empfang,
    /// Plant management.
    Werkleitung,
}

impl Department {
    /// Every department, in declaration order.
    pub const ALL: [Department; 14] = [
        Department::Produktion,
        Department::Verpackung,
        Department::Mechanik,
        Department::Elektrik,
        Department::Technik,
        Department::Logistik,
        Department::Qualitaet,
        Department::Personal,
        Department::Arbeitssicherheit,
        Department::It,
        Department::Verwaltung,
        Department::Lean,
        Department::Empfang,
        Department::Werkleitung,
    ];

    /// The label used for this department inside job titles.
    pub fn label(self) -> &'static str {
        match self {
            Department::Produktion => "Produktion",
            Department::Verpackung => "Verpackung",
            Department::Mechanik => "Mechanik",
            Department::Elektrik => "Elektrik",
            Department::Technik => "Technik",
            Department::Logistik => "Logistik",
            Department::Qualitaet => "Qualität",
            Department::Personal => "Personal",
            Department::Arbeitssicherheit => "Arbeitssicherheit",
            Department::It => "IT",
            Department::Verwaltung => "Verwaltung",
            Department::Lean => "Lean",
            Department::Empfang => "Empfang",
            Department::Werkleitung => "Werkleitung",
        }
    }

    /// Looks up a department by its title label.
    ///
    /// # Examples
    ///
    /// ```
    /// use org_hierarchy::models::Department;
    ///
    /// assert_eq!(Department::from_label("Mechanik"), Some(Department::Mechanik));
    /// assert_eq!(Department::from_label("Qualitaet"), Some(Department::Qualitaet));
    /// assert_eq!(Department::from_label("Kantine"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Department> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("Qualitaet") {
            return Some(Department::Qualitaet);
        }
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(label))
    }
}

/// Seniority level of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Individual contributor.
    Staff,
    /// Team lead (`| TL`).
    TeamLead,
    /// Deputy (`- Stv.`).
    Deputy,
    /// Shift supervisor.
    ShiftSupervisor,
    /// Department head (`| AL`).
    DepartmentHead,
    /// Head of one of the plant divisions.
    DivisionHead,
    /// Plant manager.
    PlantManager,
}

/// Working-time model encoded in a title prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    /// Rotating shift work (`Schicht - ...`).
    Rotating,
    /// Day shift (`Tagschicht - ...`).
    Day,
}

impl Shift {
    /// Looks up a shift by its title prefix.
    pub fn from_label(label: &str) -> Option<Shift> {
        match label.trim() {
            "Schicht" => Some(Shift::Rotating),
            "Tagschicht" => Some(Shift::Day),
            _ => None,
        }
    }
}

/// A job title together with its typed classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The original title.
    pub title: String,
    /// Department, if the title names a known one.
    pub department: Option<Department>,
    /// Seniority level.
    pub level: Level,
    /// Working-time model, if the title carries a shift prefix.
    pub shift: Option<Shift>,
}

impl Position {
    /// Classifies a title using the suffix conventions only.
    ///
    /// # Examples
    ///
    /// ```
    /// use org_hierarchy::models::{Department, Level, Position, Shift};
    ///
    /// let position = Position::parse("Tagschicht - Mechanik | AL");
    /// assert_eq!(position.department, Some(Department::Mechanik));
    /// assert_eq!(position.level, Level::DepartmentHead);
    /// assert_eq!(position.shift, Some(Shift::Day));
    /// ```
    pub fn parse(title: &str) -> Position {
        let trimmed = title.trim();

        let (rest, level) = if let Some(rest) = trimmed.strip_suffix("| AL") {
            (rest.trim_end(), Level::DepartmentHead)
        } else if let Some(rest) = trimmed.strip_suffix("| TL") {
            (rest.trim_end(), Level::TeamLead)
        } else if let Some(rest) = trimmed.strip_suffix("- Stv.") {
            (rest.trim_end(), Level::Deputy)
        } else {
            (trimmed, Level::Staff)
        };

        let mut segments = rest.split(" - ").map(str::trim).filter(|s| !s.is_empty());
        let first = segments.next();
        let (shift, department_label) = match first.and_then(Shift::from_label) {
            Some(shift) => (Some(shift), segments.next()),
            None => (None, first),
        };

        Position {
            title: title.to_string(),
            department: department_label.and_then(Department::from_label),
            level,
            shift,
        }
    }
}

/// A catalog entry for a title that does not follow the suffix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSpec {
    /// Department of the title.
    #[serde(default)]
    pub department: Option<Department>,
    /// Seniority level of the title.
    pub level: Level,
    /// Working-time model of the title.
    #[serde(default)]
    pub shift: Option<Shift>,
}

/// Explicit classifications for irregular titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionCatalog {
    entries: HashMap<String, PositionSpec>,
}

impl PositionCatalog {
    /// Creates a catalog from title → classification entries.
    pub fn new(entries: HashMap<String, PositionSpec>) -> Self {
        Self { entries }
    }

    /// Returns the number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Classifies a title, preferring an explicit entry over the conventions.
    pub fn resolve(&self, title: &str) -> Position {
        match self.entries.get(title.trim()) {
            Some(spec) => Position {
                title: title.to_string(),
                department: spec.department,
                level: spec.level,
                shift: spec.shift,
            },
            None => Position::parse(title),
        }
    }
}
