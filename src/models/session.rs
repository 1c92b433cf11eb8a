//! The authenticated identity a decision is made for.

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// The caller's identity, passed explicitly into every decision.
///
/// `is_admin` is a trusted flag set at login by the host application; it is
/// never derived from the employee's position.
///
/// # Examples
///
/// ```
/// use org_hierarchy::models::{EmployeeId, Session};
///
/// let session = Session::employee(EmployeeId::new(4));
/// assert!(session.is_authenticated());
/// assert!(!session.is_admin());
///
/// assert!(!Session::anonymous().is_authenticated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    employee_id: Option<EmployeeId>,
    #[serde(default)]
    is_admin: bool,
}

impl Session {
    /// A session without an authenticated identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session for an authenticated employee.
    pub fn employee(id: EmployeeId) -> Self {
        Self {
            employee_id: Some(id),
            is_admin: false,
        }
    }

    /// Returns the same session with the admin flag set as given.
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// The authenticated employee, if any.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    /// Returns true if an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.employee_id.is_some()
    }

    /// Returns the admin flag; always false without an identity.
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.is_admin
    }
}
