//! Record-level access decisions.
//!
//! The decision for "may this actor open that employee's record" is
//! evaluated in a fixed order and stops at the first check that grants:
//!
//! 1. no authenticated actor: deny;
//! 2. a bypass role (admin, HR area, training manager, EHS, plant manager): allow;
//! 3. the actor's own record: allow;
//! 4. the target is a direct report: allow;
//! 5. the target is a skip-level report: allow;
//! 6. otherwise deny.
//!
//! Enforcement (redirects, status codes) belongs to the host application.

use std::collections::BTreeSet;
use std::time::Instant;

use serde_json::json;
use tracing::debug;

use crate::config::HierarchyConfig;
use crate::directory::Directory;
use crate::error::HierarchyResult;
use crate::models::{AccessDecision, AccessGrant, EmployeeId, ManagerRecord, Session};

use super::direct::direct_subordinates;
use super::reverse::{manager_email_of, managers_of};
use super::roles::{RoleFlags, classify_session};
use super::transitive::all_subordinates;

/// Decides whether `session` may access `target_id`'s record, recording every
/// check in the decision's audit trace.
///
/// # Errors
///
/// Returns [`HierarchyError::DelegationCycle`] if the delegation overlay is
/// cyclic; every other situation resolves to allow or deny.
///
/// [`HierarchyError::DelegationCycle`]: crate::error::HierarchyError::DelegationCycle
pub fn explain_access<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    session: &Session,
    target_id: EmployeeId,
) -> HierarchyResult<AccessDecision> {
    let start = Instant::now();
    let mut decision = AccessDecision::denied(session.employee_id(), target_id);
    evaluate(directory, config, session, target_id, &mut decision)?;
    decision.audit_trace.duration_us = start.elapsed().as_micros() as u64;

    debug!(
        decision_id = %decision.decision_id,
        actor_id = ?decision.actor_id,
        target_id = %target_id,
        allowed = decision.allowed,
        granted_by = ?decision.granted_by,
        "Access decision"
    );
    Ok(decision)
}

fn evaluate<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    session: &Session,
    target_id: EmployeeId,
    decision: &mut AccessDecision,
) -> HierarchyResult<()> {
    let trace = &mut decision.audit_trace;

    let Some(actor_id) = session.employee_id() else {
        trace.push_step(
            "authenticated",
            "Authenticated Actor",
            json!({ "target_id": target_id }),
            json!({ "authenticated": false }),
            "Session carries no identity; denying",
        );
        return Ok(());
    };
    trace.push_step(
        "authenticated",
        "Authenticated Actor",
        json!({ "actor_id": actor_id, "target_id": target_id }),
        json!({ "authenticated": true }),
        format!("Session identifies employee {}", actor_id),
    );

    match directory.employee(actor_id) {
        None => trace.warn(
            "ACTOR_NOT_IN_DIRECTORY",
            format!("Employee {} is authenticated but not in the directory", actor_id),
        ),
        Some(actor) if !actor.is_active() => trace.warn(
            "ACTOR_ARCHIVED",
            format!("Employee {} is authenticated but archived", actor_id),
        ),
        Some(_) => {}
    }
    if directory.employee(target_id).is_none() {
        trace.warn(
            "TARGET_NOT_IN_DIRECTORY",
            format!("Requested record {} does not exist", target_id),
        );
    }

    let roles = classify_session(directory, config, session);
    let bypass = roles.bypasses_reporting_lines();
    trace.push_step(
        "bypass_role",
        "Bypass Role",
        serde_json::to_value(roles).unwrap_or_default(),
        json!({ "bypass": bypass }),
        if bypass {
            "Actor holds a role that may open any record"
        } else {
            "Actor holds no bypass role"
        },
    );
    if bypass {
        decision.grant(AccessGrant::BypassRole);
        return Ok(());
    }

    let is_self = actor_id == target_id;
    trace.push_step(
        "self_access",
        "Self Access",
        json!({ "actor_id": actor_id, "target_id": target_id }),
        json!({ "self": is_self }),
        if is_self {
            "Actor opened their own record"
        } else {
            "Target is a different employee"
        },
    );
    if is_self {
        decision.grant(AccessGrant::SelfAccess);
        return Ok(());
    }

    let direct = direct_subordinates(directory, config, actor_id)?;
    let is_direct = direct.contains(&target_id);
    trace.push_step(
        "direct_subordinate",
        "Direct Subordinate",
        json!({ "actor_id": actor_id, "target_id": target_id }),
        json!({ "contains": is_direct, "subordinates": direct.len() }),
        format!(
            "Target {} among the actor's {} direct reports",
            if is_direct { "is" } else { "is not" },
            direct.len()
        ),
    );
    if is_direct {
        decision.grant(AccessGrant::DirectSubordinate);
        return Ok(());
    }

    let all = all_subordinates(directory, config, actor_id)?;
    let is_transitive = all.contains(&target_id);
    trace.push_step(
        "transitive_subordinate",
        "Transitive Subordinate",
        json!({ "actor_id": actor_id, "target_id": target_id }),
        json!({ "contains": is_transitive, "subordinates": all.len() }),
        format!(
            "Target {} among the actor's {} skip-level reports",
            if is_transitive { "is" } else { "is not" },
            all.len()
        ),
    );
    if is_transitive {
        decision.grant(AccessGrant::TransitiveSubordinate);
    }

    Ok(())
}

/// Returns true if `session` may access `target_id`'s record.
///
/// # Errors
///
/// Same as [`explain_access`].
pub fn can_access_employee_record<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    session: &Session,
    target_id: EmployeeId,
) -> HierarchyResult<bool> {
    Ok(explain_access(directory, config, session, target_id)?.allowed)
}

/// Returns the active employees whose records `session` may open.
///
/// Agrees with [`can_access_employee_record`] for every active employee. The
/// actor's own id is always included for an authenticated session.
pub fn visible_employees<D: Directory + ?Sized>(
    directory: &D,
    config: &HierarchyConfig,
    session: &Session,
) -> HierarchyResult<BTreeSet<EmployeeId>> {
    let Some(actor_id) = session.employee_id() else {
        return Ok(BTreeSet::new());
    };

    if classify_session(directory, config, session).bypasses_reporting_lines() {
        return Ok(directory.find_where(&|_| true).into_iter().collect());
    }

    let mut visible = direct_subordinates(directory, config, actor_id)?;
    visible.extend(all_subordinates(directory, config, actor_id)?);
    visible.insert(actor_id);
    Ok(visible)
}

/// Entry point for request handlers: a directory and a configuration bundled
/// together.
///
/// # Example
///
/// ```no_run
/// use org_hierarchy::config::ConfigLoader;
/// use org_hierarchy::directory::InMemoryDirectory;
/// use org_hierarchy::models::{EmployeeId, Session};
/// use org_hierarchy::resolution::AccessEngine;
///
/// let config = ConfigLoader::load("./config/standard")?.into_config();
/// let directory = InMemoryDirectory::load("./tests/fixtures/employees.yaml")?;
/// let engine = AccessEngine::new(&directory, &config);
///
/// let session = Session::employee(EmployeeId::new(20));
/// if engine.can_access_employee_record(&session, EmployeeId::new(21))? {
///     println!("allowed");
/// }
/// # Ok::<(), org_hierarchy::error::HierarchyError>(())
/// ```
#[derive(Debug)]
pub struct AccessEngine<'a, D: Directory + ?Sized> {
    directory: &'a D,
    config: &'a HierarchyConfig,
}

impl<D: Directory + ?Sized> Clone for AccessEngine<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Directory + ?Sized> Copy for AccessEngine<'_, D> {}

impl<'a, D: Directory + ?Sized> AccessEngine<'a, D> {
    /// Creates an engine over the given directory and configuration.
    pub fn new(directory: &'a D, config: &'a HierarchyConfig) -> Self {
        Self { directory, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HierarchyConfig {
        self.config
    }

    /// Role predicates of the session's actor.
    pub fn roles(&self, session: &Session) -> RoleFlags {
        classify_session(self.directory, self.config, session)
    }

    /// See [`direct_subordinates`].
    pub fn direct_subordinates(
        &self,
        manager_id: EmployeeId,
    ) -> HierarchyResult<BTreeSet<EmployeeId>> {
        direct_subordinates(self.directory, self.config, manager_id)
    }

    /// See [`all_subordinates`].
    pub fn all_subordinates(&self, manager_id: EmployeeId) -> HierarchyResult<BTreeSet<EmployeeId>> {
        all_subordinates(self.directory, self.config, manager_id)
    }

    /// See [`manager_email_of`].
    pub fn manager_email_of(&self, employee_id: EmployeeId) -> HierarchyResult<Option<String>> {
        manager_email_of(self.directory, self.config, employee_id)
    }

    /// See [`managers_of`].
    pub fn managers_of(&self, employee_id: EmployeeId) -> HierarchyResult<Vec<ManagerRecord>> {
        managers_of(self.directory, self.config, employee_id)
    }

    /// See [`can_access_employee_record`].
    pub fn can_access_employee_record(
        &self,
        session: &Session,
        target_id: EmployeeId,
    ) -> HierarchyResult<bool> {
        can_access_employee_record(self.directory, self.config, session, target_id)
    }

    /// See [`explain_access`].
    pub fn explain_access(
        &self,
        session: &Session,
        target_id: EmployeeId,
    ) -> HierarchyResult<AccessDecision> {
        explain_access(self.directory, self.config, session, target_id)
    }

    /// See [`visible_employees`].
    pub fn visible_employees(&self, session: &Session) -> HierarchyResult<BTreeSet<EmployeeId>> {
        visible_employees(self.directory, self.config, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleCatalog;
    use crate::directory::InMemoryDirectory;
    use crate::error::HierarchyError;
    use crate::models::{Crew, Employee, EmployeeStatus, Gruppe, PositionCatalog};
    use crate::resolution::{
        CrewScope, DelegationEntry, DelegationOverlay, PositionSelector, RuleSet,
        SubordinateRule, TaxonomyMatch,
    };

    fn id(raw: u64) -> EmployeeId {
        EmployeeId::new(raw)
    }

    fn employee(raw: u64, position: &str, crew: &str, status: EmployeeStatus) -> Employee {
        Employee {
            id: id(raw),
            name: format!("Employee {}", raw),
            position: position.to_string(),
            crew: Crew::new(crew),
            gruppe: Gruppe::Schichtarbeit,
            status,
            email: format!("employee{}@example.com", raw),
        }
    }

    fn create_test_directory() -> InMemoryDirectory {
        use EmployeeStatus::{Active, Archived};
        InMemoryDirectory::new(vec![
            employee(1, "EHS Manager", "---", Active),
            employee(2, "Schicht - Produktion | TL", "Team K", Active),
            employee(3, "Schicht - Produktion", "Team K", Active),
            employee(4, "Schicht - Produktion", "Team L", Active),
            employee(5, "Bereichsleiter Produktion", "---", Active),
            employee(6, "Personalleiter", "---", Archived),
        ])
        .unwrap()
    }

    fn create_test_config() -> HierarchyConfig {
        let roles = RoleCatalog {
            plant_manager: "Werkleiter".to_string(),
            hr: vec!["Personalleiter".to_string()],
            ehs: vec![],
            ehs_manager: "EHS Manager".to_string(),
            division_heads: vec!["Bereichsleiter Produktion".to_string()],
            shift_supervisor: "Schichtmeister".to_string(),
            deputy_shift_supervisor: "Schichtmeister - Stv.".to_string(),
            ..Default::default()
        };
        let direct = vec![SubordinateRule {
            manager: "Schicht - Produktion | TL".to_string(),
            crew: CrewScope::SameCrew,
            gruppen: vec![],
            select: PositionSelector::Titles {
                titles: vec!["Schicht - Produktion".to_string()],
            },
            rationale: String::new(),
        }];
        let transitive = vec![SubordinateRule {
            manager: "Bereichsleiter Produktion".to_string(),
            crew: CrewScope::AssignedCrew,
            gruppen: vec![],
            select: PositionSelector::Taxonomy(TaxonomyMatch::default()),
            rationale: String::new(),
        }];
        HierarchyConfig::new(
            PositionCatalog::default(),
            roles,
            RuleSet::new("direct", direct).unwrap(),
            RuleSet::new("transitive", transitive).unwrap(),
            DelegationOverlay::empty(),
        )
        .unwrap()
    }

    #[test]
    fn test_anonymous_session_is_denied() {
        let directory = create_test_directory();
        let config = create_test_config();

        let decision = explain_access(&directory, &config, &Session::anonymous(), id(3)).unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.granted_by, None);
        assert_eq!(decision.audit_trace.steps.len(), 1);
        assert_eq!(decision.audit_trace.steps[0].rule_id, "authenticated");
    }

    #[test]
    fn test_ehs_actor_bypasses_reporting_lines() {
        let directory = create_test_directory();
        let config = create_test_config();
        let session = Session::employee(id(1));

        let decision = explain_access(&directory, &config, &session, id(4)).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.granted_by, Some(AccessGrant::BypassRole));
    }

    #[test]
    fn test_self_access_is_allowed() {
        let directory = create_test_directory();
        let config = create_test_config();
        let session = Session::employee(id(3));

        let decision = explain_access(&directory, &config, &session, id(3)).unwrap();
        assert_eq!(decision.granted_by, Some(AccessGrant::SelfAccess));
    }

    #[test]
    fn test_self_access_without_directory_record() {
        let directory = create_test_directory();
        let config = create_test_config();
        let session = Session::employee(id(77));

        let decision = explain_access(&directory, &config, &session, id(77)).unwrap();
        assert!(decision.allowed);
        let codes: Vec<&str> = decision
            .audit_trace
            .warnings
            .iter()
            .map(|w| w.code.as_str())
            .collect();
        assert_eq!(codes, vec!["ACTOR_NOT_IN_DIRECTORY", "TARGET_NOT_IN_DIRECTORY"]);
    }

    #[test]
    fn test_direct_subordinate_is_allowed() {
        let directory = create_test_directory();
        let config = create_test_config();
        let session = Session::employee(id(2));

        let decision = explain_access(&directory, &config, &session, id(3)).unwrap();
        assert_eq!(decision.granted_by, Some(AccessGrant::DirectSubordinate));
        assert!(!can_access_employee_record(&directory, &config, &session, id(4)).unwrap());
    }

    #[test]
    fn test_transitive_subordinate_is_allowed() {
        let directory = create_test_directory();
        let config = create_test_config();
        let session = Session::employee(id(5));

        let decision = explain_access(&directory, &config, &session, id(4)).unwrap();
        assert_eq!(decision.granted_by, Some(AccessGrant::TransitiveSubordinate));

        let rule_ids: Vec<&str> = decision
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "authenticated",
                "bypass_role",
                "self_access",
                "direct_subordinate",
                "transitive_subordinate"
            ]
        );
    }

    #[test]
    fn test_archived_hr_actor_loses_bypass() {
        let directory = create_test_directory();
        let config = create_test_config();
        let session = Session::employee(id(6));

        let decision = explain_access(&directory, &config, &session, id(3)).unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.audit_trace.warnings[0].code, "ACTOR_ARCHIVED");
    }

    #[test]
    fn test_admin_flag_bypasses() {
        let directory = create_test_directory();
        let config = create_test_config();
        let session = Session::employee(id(3)).with_admin(true);

        assert!(can_access_employee_record(&directory, &config, &session, id(4)).unwrap());
    }

    #[test]
    fn test_cycle_is_escalated() {
        let directory = create_test_directory();
        let config = create_test_config().with_unchecked_delegations(
            DelegationOverlay::from_entries(vec![DelegationEntry {
                manager: id(2),
                delegates: vec![id(2)],
            }]),
        );
        let session = Session::employee(id(2));

        assert!(matches!(
            can_access_employee_record(&directory, &config, &session, id(4)),
            Err(HierarchyError::DelegationCycle { .. })
        ));
    }

    #[test]
    fn test_visible_employees_for_team_lead() {
        let directory = create_test_directory();
        let config = create_test_config();

        let visible = visible_employees(&directory, &config, &Session::employee(id(2))).unwrap();
        assert_eq!(visible, [id(2), id(3)].into_iter().collect());
    }

    #[test]
    fn test_visible_employees_for_bypass_role_excludes_archived() {
        let directory = create_test_directory();
        let config = create_test_config();

        let visible = visible_employees(&directory, &config, &Session::employee(id(1))).unwrap();
        assert_eq!(
            visible,
            [id(1), id(2), id(3), id(4), id(5)].into_iter().collect()
        );
    }

    #[test]
    fn test_visible_employees_for_anonymous_is_empty() {
        let directory = create_test_directory();
        let config = create_test_config();

        assert!(
            visible_employees(&directory, &config, &Session::anonymous())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_engine_delegates_to_free_functions() {
        let directory = create_test_directory();
        let config = create_test_config();
        let engine = AccessEngine::new(&directory, &config);

        assert!(engine.roles(&Session::employee(id(5))).is_division_head);
        assert_eq!(
            engine.direct_subordinates(id(2)).unwrap(),
            [id(3)].into_iter().collect()
        );
        assert_eq!(
            engine.manager_email_of(id(3)).unwrap(),
            Some("employee2@example.com".to_string())
        );
        assert!(engine.can_access_employee_record(&Session::employee(id(5)), id(3)).unwrap());
    }
}
