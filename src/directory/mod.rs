//! Read-only access to the employee directory.
//!
//! The directory itself is owned by the HR administration system; the
//! resolver only needs lookups by id and a handful of searches. Stores
//! implement the two required methods of [`Directory`] and may override the
//! provided searches with indexed queries.
//!
//! The provided searches only ever return active employees. The resolvers
//! filter archived records again, so a custom store that forgets to cannot
//! leak them into a result.

mod memory;

pub use memory::InMemoryDirectory;

use crate::models::{Crew, Employee, EmployeeId, ManagerRecord};

/// Read access to employee records.
pub trait Directory {
    /// Looks up a single employee, active or archived.
    fn employee(&self, id: EmployeeId) -> Option<Employee>;

    /// Returns every employee record in store-defined order.
    fn employees(&self) -> Vec<Employee>;

    /// Active employees of `crew` whose title satisfies `matches`.
    fn find_by_crew_and_positions(
        &self,
        crew: &Crew,
        matches: &dyn Fn(&str) -> bool,
    ) -> Vec<EmployeeId> {
        self.find_where(&|employee| employee.crew == *crew && matches(&employee.position))
    }

    /// Active employees holding one of `titles`, regardless of crew.
    fn find_by_positions(&self, titles: &[String]) -> Vec<EmployeeId> {
        self.find_where(&|employee| titles.iter().any(|t| *t == employee.position))
    }

    /// Active employees satisfying an arbitrary predicate.
    fn find_where(&self, predicate: &dyn Fn(&Employee) -> bool) -> Vec<EmployeeId> {
        self.employees()
            .into_iter()
            .filter(|employee| employee.is_active() && predicate(employee))
            .map(|employee| employee.id)
            .collect()
    }

    /// Every active employee, projected for use as a potential manager, in
    /// store-defined order.
    fn all_active_managers(&self) -> Vec<ManagerRecord> {
        self.employees()
            .iter()
            .filter(|employee| employee.is_active())
            .map(Employee::manager_record)
            .collect()
    }
}
