//! Configuration types for hierarchy resolution.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the assembled
//! [`HierarchyConfig`] the resolvers read from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::HierarchyResult;
use crate::models::{PositionCatalog, PositionSpec};
use crate::resolution::{DelegationEntry, DelegationOverlay, RuleSet, SubordinateRule};

/// Title constants and lists that role predicates compare against.
///
/// Titles are matched exactly (after trimming). The admin role is not listed
/// here: it comes from the trusted session flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog {
    /// The plant manager title.
    pub plant_manager: String,
    /// HR titles.
    #[serde(default)]
    pub hr: Vec<String>,
    /// IT titles.
    #[serde(default)]
    pub it: Vec<String>,
    /// Environment, health and safety titles.
    #[serde(default)]
    pub ehs: Vec<String>,
    /// The EHS manager title (counts as senior management).
    pub ehs_manager: String,
    /// Training manager titles.
    #[serde(default)]
    pub training_manager: Vec<String>,
    /// Lean leader titles.
    #[serde(default)]
    pub lean_leader: Vec<String>,
    /// Reception titles.
    #[serde(default)]
    pub reception: Vec<String>,
    /// The named division-head titles.
    #[serde(default)]
    pub division_heads: Vec<String>,
    /// The shift supervisor title.
    pub shift_supervisor: String,
    /// The deputy shift supervisor title.
    pub deputy_shift_supervisor: String,
}

/// `positions.yaml` structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionsConfig {
    /// Map of irregular title to its classification.
    #[serde(default)]
    pub positions: HashMap<String, PositionSpec>,
}

/// `roles.yaml` structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// The role title catalog.
    pub roles: RoleCatalog,
}

/// `direct_rules.yaml` / `transitive_rules.yaml` structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleTableConfig {
    /// The rules of the table.
    #[serde(default)]
    pub rules: Vec<SubordinateRule>,
}

/// `delegations.yaml` structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DelegationsConfig {
    /// Manager → delegates entries.
    #[serde(default)]
    pub delegations: Vec<DelegationEntry>,
}

/// The complete configuration the resolvers read from.
///
/// Immutable once built; share it between request handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HierarchyConfig {
    positions: PositionCatalog,
    roles: RoleCatalog,
    direct_rules: RuleSet,
    transitive_rules: RuleSet,
    delegations: DelegationOverlay,
}

impl HierarchyConfig {
    /// Assembles a configuration, rejecting a cyclic delegation overlay.
    pub fn new(
        positions: PositionCatalog,
        roles: RoleCatalog,
        direct_rules: RuleSet,
        transitive_rules: RuleSet,
        delegations: DelegationOverlay,
    ) -> HierarchyResult<Self> {
        delegations.validate()?;
        Ok(Self {
            positions,
            roles,
            direct_rules,
            transitive_rules,
            delegations,
        })
    }

    /// Returns the same configuration with a different delegation overlay.
    pub fn with_delegations(mut self, delegations: DelegationOverlay) -> HierarchyResult<Self> {
        delegations.validate()?;
        self.delegations = delegations;
        Ok(self)
    }

    /// Replaces the delegation overlay without checking it for cycles.
    ///
    /// Resolution still terminates on a cyclic overlay: the resolvers detect
    /// the cycle and return [`HierarchyError::DelegationCycle`].
    ///
    /// [`HierarchyError::DelegationCycle`]: crate::error::HierarchyError::DelegationCycle
    pub fn with_unchecked_delegations(mut self, delegations: DelegationOverlay) -> Self {
        self.delegations = delegations;
        self
    }

    /// Returns the position catalog.
    pub fn positions(&self) -> &PositionCatalog {
        &self.positions
    }

    /// Returns the role title catalog.
    pub fn roles(&self) -> &RoleCatalog {
        &self.roles
    }

    /// Returns the direct-report rule table.
    pub fn direct_rules(&self) -> &RuleSet {
        &self.direct_rules
    }

    /// Returns the skip-level aggregation rule table.
    pub fn transitive_rules(&self) -> &RuleSet {
        &self.transitive_rules
    }

    /// Returns the delegation overlay.
    pub fn delegations(&self) -> &DelegationOverlay {
        &self.delegations
    }
}
