//! Employee model and related types.
//!
//! This module defines the read-only view of an employee record that the
//! resolver consumes, together with the small closed types that classify it:
//! [`Crew`], [`Gruppe`] and [`EmployeeStatus`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer identity of an employee in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u64);

impl EmployeeId {
    /// Creates an id from its raw directory value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw directory value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmployeeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A named shift team.
///
/// Employees outside rotating shift work carry the placeholder crew `---`.
///
/// # Examples
///
/// ```
/// use org_hierarchy::models::Crew;
///
/// assert!(Crew::new("Team L").is_assigned());
/// assert!(!Crew::unassigned().is_assigned());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crew(String);

impl Crew {
    /// The placeholder used by employees without a shift team.
    pub const UNASSIGNED: &'static str = "---";

    /// Creates a crew from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the placeholder crew.
    pub fn unassigned() -> Self {
        Self(Self::UNASSIGNED.to_string())
    }

    /// Returns the crew name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is a real shift team rather than the placeholder.
    pub fn is_assigned(&self) -> bool {
        let name = self.0.trim();
        !name.is_empty() && name != Self::UNASSIGNED
    }
}

impl Default for Crew {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl fmt::Display for Crew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad department classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gruppe {
    /// Rotating shift work.
    Schichtarbeit,
    /// Day shift.
    Tagschicht,
    /// Administration.
    Verwaltung,
}

/// Lifecycle status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed.
    #[default]
    Active,
    /// Left the company; kept for records only.
    Archived,
}

/// An employee record as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Directory identity.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Job title, drawn from the position vocabulary.
    pub position: String,
    /// Shift team, `---` when none.
    #[serde(default)]
    pub crew: Crew,
    /// Broad department.
    pub gruppe: Gruppe,
    /// Active or archived.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Business email address.
    pub email: String,
}

impl Employee {
    /// Returns true if the employee takes part in resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use org_hierarchy::models::{Crew, Employee, EmployeeId, EmployeeStatus, Gruppe};
    ///
    /// let employee = Employee {
    ///     id: EmployeeId::new(7),
    ///     name: "Jana Keller".to_string(),
    ///     position: "Schicht - Produktion".to_string(),
    ///     crew: Crew::new("Team L"),
    ///     gruppe: Gruppe::Schichtarbeit,
    ///     status: EmployeeStatus::Archived,
    ///     email: "j.keller@example.com".to_string(),
    /// };
    /// assert!(!employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Returns the fields needed to act as a potential manager.
    pub fn manager_record(&self) -> ManagerRecord {
        ManagerRecord {
            id: self.id,
            position: self.position.clone(),
            crew: self.crew.clone(),
            email: self.email.clone(),
        }
    }
}

/// The projection of an employee used by the reverse-manager lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRecord {
    /// Directory identity.
    pub id: EmployeeId,
    /// Job title.
    pub position: String,
    /// Shift team.
    pub crew: Crew,
    /// Business email address.
    pub email: String,
}
