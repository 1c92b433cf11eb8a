//! Direct-subordinate resolution.
//!
//! A manager's direct reports are the employees selected by the direct rule
//! for the manager's exact title, plus the direct reports of every delegate
//! registered for the manager, recursively.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::config::HierarchyConfig;
use crate::directory::Directory;
use crate::error::{HierarchyError, HierarchyResult};
use crate::models::EmployeeId;

/// Returns the employees reporting directly to `manager_id`.
///
/// Resolution rules:
/// - an unknown or archived manager has no reports;
/// - a title without a direct rule has no reports, and its delegates are
///   not consulted;
/// - the manager's own id is never part of the result;
/// - archived employees are never part of the result.
///
/// # Errors
///
/// Returns [`HierarchyError::DelegationCycle`] if following delegates leads
/// back to a manager that is already being expanded.
pub fn direct_subordinates<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    manager_id: EmployeeId,
) -> HierarchyResult<BTreeSet<EmployeeId>> {
    let mut path = Vec::new();
    let mut resolved = HashMap::new();
    let mut subordinates = collect(directory, config, manager_id, &mut path, &mut resolved)?;
    subordinates.remove(&manager_id);
    Ok(subordinates)
}

fn collect<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    manager_id: EmployeeId,
    path: &mut Vec<EmployeeId>,
    resolved: &mut HashMap<EmployeeId, BTreeSet<EmployeeId>>,
) -> HierarchyResult<BTreeSet<EmployeeId>> {
    if let Some(start) = path.iter().position(|id| *id == manager_id) {
        let mut chain = path[start..].to_vec();
        chain.push(manager_id);
        warn!(manager_id = %manager_id, ?chain, "Delegation cycle while resolving subordinates");
        return Err(HierarchyError::DelegationCycle { chain });
    }

    // A delegate reached along several paths is expanded once.
    if let Some(cached) = resolved.get(&manager_id) {
        return Ok(cached.clone());
    }

    let Some(manager) = directory.employee(manager_id).filter(|e| e.is_active()) else {
        debug!(manager_id = %manager_id, "Manager not found or archived");
        return Ok(BTreeSet::new());
    };

    let Some(rule) = config.direct_rules().rule_for(&manager.position) else {
        debug!(
            manager_id = %manager_id,
            position = %manager.position,
            "Position has no direct rule"
        );
        return Ok(BTreeSet::new());
    };

    let mut subordinates = rule.evaluate(directory, config.positions(), &manager);
    subordinates.remove(&manager_id);

    let delegates = config.delegations().delegates_of(manager_id);
    if !delegates.is_empty() {
        path.push(manager_id);
        for delegate in delegates {
            let folded = collect(directory, config, *delegate, path, resolved)?;
            debug!(
                manager_id = %manager_id,
                delegate_id = %delegate,
                folded = folded.len(),
                "Folded in delegate's subordinates"
            );
            subordinates.extend(folded);
        }
        path.pop();
    }

    resolved.insert(manager_id, subordinates.clone());
    Ok(subordinates)
}
