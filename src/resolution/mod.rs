//! Hierarchy resolution and access decisions.
//!
//! This module contains the rule tables, the delegation overlay and the
//! resolvers built on top of them:
//!
//! - Role classification from job titles
//! - Direct subordinates (rule table plus delegation)
//! - Skip-level subordinates for senior titles
//! - Reverse lookup of an employee's manager
//! - Record-level access decisions with an audit trace

mod access;
mod delegation;
mod direct;
mod reverse;
mod roles;
mod rules;
mod transitive;

pub use access::{AccessEngine, can_access_employee_record, explain_access, visible_employees};
pub use delegation::{DelegationEntry, DelegationOverlay};
pub use direct::direct_subordinates;
pub use reverse::{manager_email_of, managers_of};
pub use roles::{RoleFlags, classify_session};
pub use rules::{CrewScope, PositionSelector, RuleSet, SubordinateRule, TaxonomyMatch};
pub use transitive::all_subordinates;
