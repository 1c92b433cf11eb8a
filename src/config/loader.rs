//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the hierarchy
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{HierarchyError, HierarchyResult};
use crate::models::PositionCatalog;
use crate::resolution::{DelegationOverlay, RuleSet};

use super::types::{
    DelegationsConfig, HierarchyConfig, PositionsConfig, RolesConfig, RuleTableConfig,
};

/// Loads and provides access to the hierarchy configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── positions.yaml         # Irregular title → typed position
/// ├── roles.yaml             # Role title constants and lists
/// ├── direct_rules.yaml      # Direct-report rule table
/// ├── transitive_rules.yaml  # Skip-level aggregation rule table
/// └── delegations.yaml       # Optional manager → delegates overlay
/// ```
///
/// # Example
///
/// ```no_run
/// use org_hierarchy::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// println!("{} direct rules", loader.config().direct_rules().len());
/// # Ok::<(), org_hierarchy::error::HierarchyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HierarchyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A rule table lists the same manager title twice
    /// - The delegation overlay contains a cycle
    pub fn load<P: AsRef<Path>>(path: P) -> HierarchyResult<Self> {
        let path = path.as_ref();

        let positions = read_yaml::<PositionsConfig>(&path.join("positions.yaml"))?;
        let roles = read_yaml::<RolesConfig>(&path.join("roles.yaml"))?;
        let direct = read_yaml::<RuleTableConfig>(&path.join("direct_rules.yaml"))?;
        let transitive = read_yaml::<RuleTableConfig>(&path.join("transitive_rules.yaml"))?;

        let delegations_path = path.join("delegations.yaml");
        let delegations = if delegations_path.exists() {
            read_yaml::<DelegationsConfig>(&delegations_path)?.delegations
        } else {
            debug!(path = %delegations_path.display(), "No delegation overlay configured");
            Vec::new()
        };

        let config = HierarchyConfig::new(
            PositionCatalog::new(positions.positions),
            roles.roles,
            RuleSet::new("direct", direct.rules)?,
            RuleSet::new("transitive", transitive.rules)?,
            DelegationOverlay::from_entries(delegations),
        )?;

        info!(
            path = %path.display(),
            positions = config.positions().len(),
            direct_rules = config.direct_rules().len(),
            transitive_rules = config.transitive_rules().len(),
            delegations = config.delegations().len(),
            "Loaded hierarchy configuration"
        );

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> HierarchyConfig {
        self.config
    }
}

/// Loads and parses a YAML file.
pub(crate) fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> HierarchyResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| HierarchyError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| HierarchyError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
