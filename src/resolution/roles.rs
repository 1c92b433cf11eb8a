//! Role classification and area gates.
//!
//! Roles are never stored. They are a pure function of the actor's job title
//! (compared against the [`RoleCatalog`]) plus the trusted admin flag of the
//! session. Area gates are plain ORs over the role predicates; enforcing them
//! (redirecting, returning a status code) is up to the host application.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{HierarchyConfig, RoleCatalog};
use crate::directory::Directory;
use crate::models::{Level, PositionCatalog, Session};

/// Role predicates of one actor.
///
/// The default value has every predicate false, which is what an
/// unauthenticated actor gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleFlags {
    /// Trusted admin flag from the session.
    pub is_admin: bool,
    /// Plant manager.
    pub is_plant_manager: bool,
    /// Human resources.
    pub is_hr: bool,
    /// IT.
    pub is_it: bool,
    /// Environment, health and safety.
    pub is_ehs: bool,
    /// Training manager.
    pub is_training_manager: bool,
    /// Lean leader.
    pub is_lean_leader: bool,
    /// Reception desk.
    pub is_reception: bool,
    /// One of the named division heads.
    pub is_division_head: bool,
    /// Shift supervisor.
    pub is_shift_supervisor: bool,
    /// Deputy shift supervisor.
    pub is_deputy_shift_supervisor: bool,
    /// Division head, area lead (`| AL`), shift supervisor or deputy.
    pub is_leader: bool,
    /// Plant manager, division heads or EHS manager.
    pub is_senior_management: bool,
}

fn listed(list: &[String], title: &str) -> bool {
    list.iter().any(|t| t.trim() == title)
}

fn named(constant: &str, title: &str) -> bool {
    !constant.trim().is_empty() && constant.trim() == title
}

impl RoleFlags {
    /// Classifies a title.
    ///
    /// `title` is `None` when the actor has no directory record to read a
    /// position from; only the admin flag can then be set.
    pub fn classify(
        roles: &RoleCatalog,
        positions: &PositionCatalog,
        title: Option<&str>,
        is_admin: bool,
    ) -> RoleFlags {
        let Some(title) = title.map(str::trim) else {
            return RoleFlags {
                is_admin,
                ..RoleFlags::default()
            };
        };

        let is_plant_manager = named(&roles.plant_manager, title);
        let is_division_head = listed(&roles.division_heads, title);
        let is_shift_supervisor = named(&roles.shift_supervisor, title);
        let is_deputy_shift_supervisor = named(&roles.deputy_shift_supervisor, title);
        let is_area_lead = positions.resolve(title).level == Level::DepartmentHead;
        let is_ehs_manager = named(&roles.ehs_manager, title);

        RoleFlags {
            is_admin,
            is_plant_manager,
            is_hr: listed(&roles.hr, title),
            is_it: listed(&roles.it, title),
            is_ehs: listed(&roles.ehs, title) || is_ehs_manager,
            is_training_manager: listed(&roles.training_manager, title),
            is_lean_leader: listed(&roles.lean_leader, title),
            is_reception: listed(&roles.reception, title),
            is_division_head,
            is_shift_supervisor,
            is_deputy_shift_supervisor,
            is_leader: is_division_head
                || is_area_lead
                || is_shift_supervisor
                || is_deputy_shift_supervisor,
            is_senior_management: is_plant_manager || is_division_head || is_ehs_manager,
        }
    }

    /// HR area: admin, HR or plant manager.
    pub fn hr_area(&self) -> bool {
        self.is_admin || self.is_hr || self.is_plant_manager
    }

    /// Safety area: admin, EHS or plant manager.
    pub fn safety_area(&self) -> bool {
        self.is_admin || self.is_ehs || self.is_plant_manager
    }

    /// Training area.
    pub fn training_area(&self) -> bool {
        self.is_admin
            || self.is_hr
            || self.is_ehs
            || self.is_training_manager
            || self.is_plant_manager
            || self.is_lean_leader
    }

    /// Onboarding area: HR-area roles, reception and leaders.
    pub fn onboarding_area(&self) -> bool {
        self.hr_area() || self.is_reception || self.is_leader
    }

    /// IT dashboards.
    pub fn it_area(&self) -> bool {
        self.is_admin || self.is_it
    }

    /// Talent review forms: HR-area roles and leaders.
    pub fn review_area(&self) -> bool {
        self.hr_area() || self.is_leader
    }

    /// Roles that may open any employee record regardless of reporting lines.
    pub fn bypasses_reporting_lines(&self) -> bool {
        self.is_admin
            || self.hr_area()
            || self.is_training_manager
            || self.is_ehs
            || self.is_plant_manager
    }
}

/// Classifies the actor behind a session.
///
/// Fails closed: an anonymous session gets no roles at all, and an actor
/// missing from the directory (or archived) keeps only the admin flag.
pub fn classify_session<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    session: &Session,
) -> RoleFlags {
    let Some(actor_id) = session.employee_id() else {
        return RoleFlags::default();
    };

    let actor = directory.employee(actor_id).filter(|e| e.is_active());
    if actor.is_none() {
        debug!(actor_id = %actor_id, "Actor has no active directory record");
    }

    RoleFlags::classify(
        config.roles(),
        config.positions(),
        actor.as_ref().map(|e| e.position.as_str()),
        session.is_admin(),
    )
}
