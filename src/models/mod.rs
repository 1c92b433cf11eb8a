//! Core data models for the hierarchy resolver.
//!
//! This module contains the domain models shared by the directory, the
//! resolvers and the access decision engine.

mod decision;
mod employee;
mod position;
mod session;

pub use decision::{AccessDecision, AccessGrant, AuditStep, AuditTrace, AuditWarning};
pub use employee::{Crew, Employee, EmployeeId, EmployeeStatus, Gruppe, ManagerRecord};
pub use position::{Department, Level, Position, PositionCatalog, PositionSpec, Shift};
pub use session::Session;
