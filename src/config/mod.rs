//! Configuration loading and management for the hierarchy resolver.
//!
//! This module loads the position catalog, role titles, both rule tables and
//! the delegation overlay from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use org_hierarchy::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap().into_config();
//! println!("{} transitive rules", config.transitive_rules().len());
//! ```

mod loader;
mod types;

pub(crate) use loader::read_yaml;

pub use loader::ConfigLoader;
pub use types::{
    DelegationsConfig, HierarchyConfig, PositionsConfig, RoleCatalog, RolesConfig,
    RuleTableConfig,
};
