//! Reverse-manager lookup.
//!
//! Finds "my manager" for notification routing by scanning every potential
//! manager and checking their direct reports.

use tracing::debug;

use crate::config::HierarchyConfig;
use crate::directory::Directory;
use crate::error::HierarchyResult;
use crate::models::{EmployeeId, ManagerRecord};

use super::direct::direct_subordinates;

/// Returns the business email of the first manager whose direct reports
/// contain `employee_id`, or `None`.
///
/// Managers are scanned in the directory's own order and the first match
/// wins. When rules overlap and several managers claim the same employee,
/// the result depends on that order; [`managers_of`] lists all of them.
pub fn manager_email_of<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    employee_id: EmployeeId,
) -> HierarchyResult<Option<String>> {
    Ok(scan(directory, config, employee_id, true)?
        .into_iter()
        .next()
        .map(|manager| manager.email))
}

/// Returns every manager whose direct reports contain `employee_id`, in
/// directory order.
pub fn managers_of<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    employee_id: EmployeeId,
) -> HierarchyResult<Vec<ManagerRecord>> {
    scan(directory, config, employee_id, false)
}

fn scan<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    employee_id: EmployeeId,
    first_only: bool,
) -> HierarchyResult<Vec<ManagerRecord>> {
    if !directory
        .employee(employee_id)
        .is_some_and(|employee| employee.is_active())
    {
        debug!(employee_id = %employee_id, "Employee not found or archived");
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for candidate in directory.all_active_managers() {
        // Titles without a direct rule resolve to nobody.
        if !config.direct_rules().contains(&candidate.position) {
            continue;
        }

        let subordinates = direct_subordinates(directory, config, candidate.id)?;
        if subordinates.contains(&employee_id) {
            debug!(
                employee_id = %employee_id,
                manager_id = %candidate.id,
                "Found manager"
            );
            found.push(candidate);
            if first_only {
                break;
            }
        }
    }
    Ok(found)
}
