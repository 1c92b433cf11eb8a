//! Organizational hierarchy resolver and authorization engine.
//!
//! This crate answers two questions for an HR administration system:
//! which employees a manager is responsible for (directly and through
//! skip-level aggregation or temporary delegation), and whether an
//! authenticated actor may open a given employee's record.

#![warn(missing_docs)]

pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod resolution;
