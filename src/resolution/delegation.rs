//! Delegation overlay.
//!
//! While a manager is absent, one or more other managers cover for them: the
//! delegates' direct reports are folded into the manager's own. The overlay is
//! injected configuration, read-only for the resolver, and shared between
//! concurrent evaluations.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, HierarchyResult};
use crate::models::EmployeeId;

/// One `delegations.yaml` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationEntry {
    /// The manager whose reports are extended.
    pub manager: EmployeeId,
    /// The managers whose reports are folded in, in order.
    pub delegates: Vec<EmployeeId>,
}

/// Manager → delegates mapping.
///
/// # Example
///
/// ```
/// use org_hierarchy::models::EmployeeId;
/// use org_hierarchy::resolution::{DelegationEntry, DelegationOverlay};
///
/// let overlay = DelegationOverlay::from_entries(vec![DelegationEntry {
///     manager: EmployeeId::new(10),
///     delegates: vec![EmployeeId::new(11)],
/// }]);
/// assert_eq!(overlay.delegates_of(EmployeeId::new(10)), &[EmployeeId::new(11)]);
/// assert!(overlay.delegates_of(EmployeeId::new(11)).is_empty());
/// assert!(overlay.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegationOverlay {
    delegates: HashMap<EmployeeId, Vec<EmployeeId>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

impl DelegationOverlay {
    /// An overlay without delegations.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an overlay; repeated managers have their delegate lists merged.
    pub fn from_entries(entries: Vec<DelegationEntry>) -> Self {
        let mut delegates: HashMap<EmployeeId, Vec<EmployeeId>> = HashMap::new();
        for entry in entries {
            let list = delegates.entry(entry.manager).or_default();
            for delegate in entry.delegates {
                if !list.contains(&delegate) {
                    list.push(delegate);
                }
            }
        }
        Self { delegates }
    }

    /// The delegates registered for a manager.
    pub fn delegates_of(&self, manager: EmployeeId) -> &[EmployeeId] {
        self.delegates
            .get(&manager)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of managers with at least one delegate entry.
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    /// Returns true if no delegation is configured.
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// Checks that the delegation graph is acyclic.
    ///
    /// Managers are visited in id order so the reported chain is stable.
    pub fn validate(&self) -> HierarchyResult<()> {
        let managers: BTreeSet<EmployeeId> = self.delegates.keys().copied().collect();
        let mut state = HashMap::new();
        let mut path = Vec::new();
        for manager in managers {
            self.visit(manager, &mut state, &mut path)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        manager: EmployeeId,
        state: &mut HashMap<EmployeeId, VisitState>,
        path: &mut Vec<EmployeeId>,
    ) -> HierarchyResult<()> {
        match state.get(&manager) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::InProgress) => {
                let start = path.iter().position(|id| *id == manager).unwrap_or(0);
                let mut chain = path[start..].to_vec();
                chain.push(manager);
                return Err(HierarchyError::DelegationCycle { chain });
            }
            None => {}
        }

        state.insert(manager, VisitState::InProgress);
        path.push(manager);
        for delegate in self.delegates_of(manager) {
            self.visit(*delegate, state, path)?;
        }
        path.pop();
        state.insert(manager, VisitState::Done);
        Ok(())
    }
}
