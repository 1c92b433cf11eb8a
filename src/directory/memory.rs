//! In-memory directory store.
//!
//! Keeps records in insertion order, which is the order the reverse-manager
//! lookup scans them in. Useful for tests, benchmarks and for hosts that load
//! a directory snapshot at startup.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::config::read_yaml;
use crate::error::{HierarchyError, HierarchyResult};
use crate::models::{Employee, EmployeeId, ManagerRecord};

use super::Directory;

#[derive(Debug, Deserialize)]
struct DirectorySnapshot {
    employees: Vec<Employee>,
}

/// An insertion-ordered directory held in memory.
///
/// # Example
///
/// ```
/// use org_hierarchy::directory::{Directory, InMemoryDirectory};
/// use org_hierarchy::models::{Crew, Employee, EmployeeId, EmployeeStatus, Gruppe};
///
/// let directory = InMemoryDirectory::new(vec![Employee {
///     id: EmployeeId::new(1),
///     name: "Anna Roth".to_string(),
///     position: "Werkleiter".to_string(),
///     crew: Crew::unassigned(),
///     gruppe: Gruppe::Verwaltung,
///     status: EmployeeStatus::Active,
///     email: "a.roth@example.com".to_string(),
/// }])?;
/// assert!(directory.employee(EmployeeId::new(1)).is_some());
/// # Ok::<(), org_hierarchy::error::HierarchyError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    records: Vec<Employee>,
    index: HashMap<EmployeeId, usize>,
}

impl InMemoryDirectory {
    /// Builds a directory, rejecting duplicate ids.
    pub fn new(records: Vec<Employee>) -> HierarchyResult<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, employee) in records.iter().enumerate() {
            if index.insert(employee.id, position).is_some() {
                return Err(HierarchyError::DuplicateEmployee { id: employee.id });
            }
        }
        Ok(Self { records, index })
    }

    /// Loads a YAML snapshot with a top-level `employees:` list.
    pub fn load<P: AsRef<Path>>(path: P) -> HierarchyResult<Self> {
        let path = path.as_ref();
        let snapshot: DirectorySnapshot = read_yaml(path)?;
        let directory = Self::new(snapshot.employees)?;
        info!(
            path = %path.display(),
            employees = directory.len(),
            "Loaded directory snapshot"
        );
        Ok(directory)
    }

    /// Number of records, active and archived.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Directory for InMemoryDirectory {
    fn employee(&self, id: EmployeeId) -> Option<Employee> {
        self.index.get(&id).map(|&i| self.records[i].clone())
    }

    fn employees(&self) -> Vec<Employee> {
        self.records.clone()
    }

    fn find_where(&self, predicate: &dyn Fn(&Employee) -> bool) -> Vec<EmployeeId> {
        self.records
            .iter()
            .filter(|employee| employee.is_active() && predicate(employee))
            .map(|employee| employee.id)
            .collect()
    }

    fn all_active_managers(&self) -> Vec<ManagerRecord> {
        self.records
            .iter()
            .filter(|employee| employee.is_active())
            .map(Employee::manager_record)
            .collect()
    }
}
