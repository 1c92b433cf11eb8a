//! Transitive (skip-level) subordinate resolution.
//!
//! A handful of senior titles aggregate whole departments through the
//! transitive rule table. Every other title degenerates to its direct
//! reports; the resolver does not walk the reporting chain downward.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::HierarchyConfig;
use crate::directory::Directory;
use crate::error::HierarchyResult;
use crate::models::EmployeeId;

use super::direct::direct_subordinates;

/// Returns every employee under `manager_id`.
///
/// For titles with a transitive rule, the rule alone decides; delegation is
/// not folded in. For all other titles this is [`direct_subordinates`].
///
/// # Errors
///
/// Only the fallback to [`direct_subordinates`] can fail, with
/// [`HierarchyError::DelegationCycle`].
///
/// [`HierarchyError::DelegationCycle`]: crate::error::HierarchyError::DelegationCycle
pub fn all_subordinates<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    manager_id: EmployeeId,
) -> HierarchyResult<BTreeSet<EmployeeId>> {
    let Some(manager) = directory.employee(manager_id).filter(|e| e.is_active()) else {
        return Ok(BTreeSet::new());
    };

    match config.transitive_rules().rule_for(&manager.position) {
        Some(rule) => {
            let mut subordinates = rule.evaluate(directory, config.positions(), &manager);
            subordinates.remove(&manager_id);
            debug!(
                manager_id = %manager_id,
                position = %manager.position,
                count = subordinates.len(),
                "Resolved skip-level subordinates"
            );
            Ok(subordinates)
        }
        None => direct_subordinates(directory, config, manager_id),
    }
}
