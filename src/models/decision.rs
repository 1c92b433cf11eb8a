//! Access decision models.
//!
//! This module contains the [`AccessDecision`] type and the audit trace that
//! records how a decision was reached, step by step, so that a denied request
//! can be explained to an administrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmployeeId;

/// The rule that granted access to a record.
///
/// # Example
///
/// ```
/// use org_hierarchy::models::AccessGrant;
///
/// let grant = AccessGrant::DirectSubordinate;
/// assert_eq!(serde_json::to_string(&grant).unwrap(), "\"direct_subordinate\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessGrant {
    /// The actor holds a role that bypasses reporting lines.
    BypassRole,
    /// The actor opened their own record.
    SelfAccess,
    /// The target reports directly to the actor (possibly through delegation).
    DirectSubordinate,
    /// The target falls under the actor's skip-level aggregation.
    TransitiveSubordinate,
}

/// A single step in the audit trace recording one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the check that was evaluated.
    pub rule_id: String,
    /// The human-readable name of the check.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the outcome.
    pub reasoning: String,
}

/// A data-quality warning raised while deciding.
///
/// Warnings never change the outcome; they flag records an administrator
/// should look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete audit trace for a decision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The checks evaluated, in order.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated while deciding.
    pub warnings: Vec<AuditWarning>,
    /// The total decision duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Appends a step, numbering it after the existing ones.
    pub fn push_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: impl Into<String>) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message: message.into(),
        });
    }
}

/// The outcome of a record-level access check.
///
/// # Example
///
/// ```
/// use org_hierarchy::models::{AccessDecision, AccessGrant, AuditTrace, EmployeeId};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let decision = AccessDecision {
///     decision_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     actor_id: Some(EmployeeId::new(4)),
///     target_id: EmployeeId::new(4),
///     allowed: true,
///     granted_by: Some(AccessGrant::SelfAccess),
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(decision.allowed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Unique identifier for this decision.
    pub decision_id: Uuid,
    /// When the decision was made.
    pub timestamp: DateTime<Utc>,
    /// The acting employee, `None` for anonymous sessions.
    pub actor_id: Option<EmployeeId>,
    /// The employee whose record was requested.
    pub target_id: EmployeeId,
    /// Whether access is allowed.
    pub allowed: bool,
    /// The rule that granted access, if allowed.
    pub granted_by: Option<AccessGrant>,
    /// Record of every check evaluated.
    pub audit_trace: AuditTrace,
}

impl AccessDecision {
    /// Creates a denied decision with an empty trace.
    pub fn denied(actor_id: Option<EmployeeId>, target_id: EmployeeId) -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            target_id,
            allowed: false,
            granted_by: None,
            audit_trace: AuditTrace::default(),
        }
    }

    /// Marks the decision as allowed by the given rule.
    pub fn grant(&mut self, grant: AccessGrant) {
        self.allowed = true;
        self.granted_by = Some(grant);
    }
}
