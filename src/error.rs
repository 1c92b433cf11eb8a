//! Error types for the hierarchy resolver.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Most resolution outcomes are not errors at all: an unknown employee or a
//! position without a rule resolves to an empty set. Only configuration
//! problems are reported here.

use thiserror::Error;

use crate::models::EmployeeId;

/// The main error type for the hierarchy resolver.
///
/// # Example
///
/// ```
/// use org_hierarchy::error::HierarchyError;
///
/// let error = HierarchyError::ConfigNotFound {
///     path: "/missing/roles.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roles.yaml");
/// ```
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rule table contains two rules for the same manager title.
    #[error("Duplicate {table} rule for position '{position}'")]
    DuplicateRule {
        /// The name of the rule table ("direct" or "transitive").
        table: String,
        /// The manager title that appears twice.
        position: String,
    },

    /// A directory snapshot contains two records with the same id.
    #[error("Duplicate employee id {id} in directory")]
    DuplicateEmployee {
        /// The repeated id.
        id: EmployeeId,
    },

    /// The delegation overlay contains a cycle.
    ///
    /// `chain` lists the managers along the cycle, starting and ending with
    /// the same id.
    #[error("Delegation cycle detected: {}", format_chain(.chain))]
    DelegationCycle {
        /// The managers forming the cycle.
        chain: Vec<EmployeeId>,
    },
}

fn format_chain(chain: &[EmployeeId]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A type alias for Results that return HierarchyError.
pub type HierarchyResult<T> = Result<T, HierarchyError>;
