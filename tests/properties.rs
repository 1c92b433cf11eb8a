//! Property tests for the resolver invariants over generated directories and
//! delegation graphs, evaluated against the standard configuration.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use proptest::prelude::*;

use org_hierarchy::config::{ConfigLoader, HierarchyConfig};
use org_hierarchy::directory::{Directory, InMemoryDirectory};
use org_hierarchy::error::HierarchyError;
use org_hierarchy::models::{Crew, Employee, EmployeeId, EmployeeStatus, Gruppe, Session};
use org_hierarchy::resolution::{
    DelegationEntry, DelegationOverlay, all_subordinates, can_access_employee_record,
    direct_subordinates, visible_employees,
};

const TITLES: &[&str] = &[
    "Schichtmeister",
    "Schichtmeister - Stv.",
    "Schicht - Produktion | TL",
    "Schicht - Produktion",
    "Schicht - Mechanik | TL",
    "Schicht - Mechanik",
    "Tagschicht - Mechanik | AL",
    "Tagschicht - Mechanik | TL",
    "Tagschicht - Mechanik",
    "Bereichsleiter Produktion",
    "Bereichsleiter Technik",
    "Bereichsleiter Verwaltung",
    "Personalleiter",
    "Fachkraft für Arbeitssicherheit",
    "Empfang",
    "Kantinenkraft",
];

const CREWS: &[&str] = &["Team K", "Team L", "Team M", "---"];

const GRUPPEN: [Gruppe; 3] = [Gruppe::Schichtarbeit, Gruppe::Tagschicht, Gruppe::Verwaltung];

/// Ids are drawn from a range slightly wider than the directory so that
/// delegations and sessions may refer to unknown employees.
const MAX_ID: u64 = 30;

fn standard_config() -> &'static HierarchyConfig {
    static CONFIG: OnceLock<HierarchyConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        ConfigLoader::load("./config/standard")
            .expect("Failed to load config")
            .into_config()
    })
}

fn directory_strategy() -> impl Strategy<Value = InMemoryDirectory> {
    prop::collection::vec(
        (
            0..TITLES.len(),
            0..CREWS.len(),
            0..GRUPPEN.len(),
            prop::bool::weighted(0.8),
        ),
        1..25,
    )
    .prop_map(|rows| {
        let employees = rows
            .into_iter()
            .enumerate()
            .map(|(index, (title, crew, gruppe, active))| {
                let raw = index as u64 + 1;
                Employee {
                    id: EmployeeId::new(raw),
                    name: format!("Employee {}", raw),
                    position: TITLES[title].to_string(),
                    crew: Crew::new(CREWS[crew]),
                    gruppe: GRUPPEN[gruppe],
                    status: if active {
                        EmployeeStatus::Active
                    } else {
                        EmployeeStatus::Archived
                    },
                    email: format!("employee{}@werk.example.com", raw),
                }
            })
            .collect();
        InMemoryDirectory::new(employees).unwrap()
    })
}

fn edges_strategy() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((1..=MAX_ID, 1..=MAX_ID), 0..12)
}

fn overlay(edges: &[(u64, u64)]) -> DelegationOverlay {
    DelegationOverlay::from_entries(
        edges
            .iter()
            .map(|(manager, delegate)| DelegationEntry {
                manager: EmployeeId::new(*manager),
                delegates: vec![EmployeeId::new(*delegate)],
            })
            .collect(),
    )
}

/// Keeps only edges pointing to a higher id, which can never close a cycle.
fn acyclic_config(edges: &[(u64, u64)]) -> HierarchyConfig {
    let upward: Vec<(u64, u64)> = edges.iter().copied().filter(|(m, d)| m < d).collect();
    standard_config()
        .clone()
        .with_delegations(overlay(&upward))
        .unwrap()
}

fn all_ids() -> impl Iterator<Item = EmployeeId> {
    (1..=MAX_ID).map(EmployeeId::new)
}

fn active_ids(directory: &InMemoryDirectory) -> BTreeSet<EmployeeId> {
    directory
        .employees()
        .into_iter()
        .filter(|e| e.is_active())
        .map(|e| e.id)
        .collect()
}

proptest! {
    #[test]
    fn manager_is_never_own_subordinate(
        directory in directory_strategy(),
        edges in edges_strategy(),
    ) {
        let config = acyclic_config(&edges);
        for manager in all_ids() {
            let direct = direct_subordinates(&directory, &config, manager).unwrap();
            let all = all_subordinates(&directory, &config, manager).unwrap();
            prop_assert!(!direct.contains(&manager));
            prop_assert!(!all.contains(&manager));
        }
    }

    #[test]
    fn archived_employees_never_appear(
        directory in directory_strategy(),
        edges in edges_strategy(),
    ) {
        let config = acyclic_config(&edges);
        let active = active_ids(&directory);
        for manager in all_ids() {
            let direct = direct_subordinates(&directory, &config, manager).unwrap();
            let all = all_subordinates(&directory, &config, manager).unwrap();
            prop_assert!(direct.is_subset(&active));
            prop_assert!(all.is_subset(&active));
            if !active.contains(&manager) {
                prop_assert!(direct.is_empty());
                prop_assert!(all.is_empty());
            }
        }
    }

    #[test]
    fn titles_without_rule_have_no_subordinates(
        directory in directory_strategy(),
        edges in edges_strategy(),
    ) {
        let config = acyclic_config(&edges);
        for employee in directory.employees() {
            if !config.direct_rules().contains(&employee.position) {
                let direct = direct_subordinates(&directory, &config, employee.id).unwrap();
                prop_assert!(direct.is_empty());
            }
        }
    }

    #[test]
    fn authenticated_actor_can_access_own_record(
        directory in directory_strategy(),
        actor in 1..=MAX_ID,
    ) {
        let actor = EmployeeId::new(actor);
        let allowed =
            can_access_employee_record(&directory, standard_config(), &Session::employee(actor), actor)
                .unwrap();
        prop_assert!(allowed);
    }

    #[test]
    fn adding_admin_never_revokes_access(
        directory in directory_strategy(),
        edges in edges_strategy(),
        actor in 1..=MAX_ID,
        target in 1..=MAX_ID,
    ) {
        let config = acyclic_config(&edges);
        let session = Session::employee(EmployeeId::new(actor));
        let target = EmployeeId::new(target);

        let before = can_access_employee_record(&directory, &config, &session, target).unwrap();
        let after =
            can_access_employee_record(&directory, &config, &session.with_admin(true), target)
                .unwrap();
        prop_assert!(!before || after);
    }

    #[test]
    fn delegation_extends_direct_reports(
        directory in directory_strategy(),
        edges in edges_strategy(),
    ) {
        let config = acyclic_config(&edges);
        for manager in directory.employees() {
            if !manager.is_active() || !config.direct_rules().contains(&manager.position) {
                continue;
            }
            let own = direct_subordinates(&directory, &config, manager.id).unwrap();
            for delegate in config.delegations().delegates_of(manager.id) {
                let mut folded = direct_subordinates(&directory, &config, *delegate).unwrap();
                folded.remove(&manager.id);
                prop_assert!(own.is_superset(&folded));
            }
        }
    }

    #[test]
    fn cyclic_delegation_terminates(
        directory in directory_strategy(),
        edges in edges_strategy(),
    ) {
        let config = standard_config().clone().with_unchecked_delegations(overlay(&edges));
        for manager in all_ids() {
            match direct_subordinates(&directory, &config, manager) {
                Ok(_) => {}
                Err(HierarchyError::DelegationCycle { chain }) => {
                    prop_assert!(chain.len() >= 2);
                    prop_assert_eq!(chain.first(), chain.last());
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn visible_employees_agree_with_access_checks(
        directory in directory_strategy(),
        edges in edges_strategy(),
        actor in 1..=MAX_ID,
        is_admin in prop::bool::weighted(0.1),
    ) {
        let config = acyclic_config(&edges);
        let session = Session::employee(EmployeeId::new(actor)).with_admin(is_admin);

        let visible = visible_employees(&directory, &config, &session).unwrap();
        for target in active_ids(&directory) {
            let allowed = can_access_employee_record(&directory, &config, &session, target).unwrap();
            prop_assert_eq!(visible.contains(&target), allowed, "target {}", target);
        }
    }
}

#[test]
fn anonymous_session_sees_nothing() {
    let directory = InMemoryDirectory::load("./tests/fixtures/employees.yaml").unwrap();
    let visible = visible_employees(&directory, standard_config(), &Session::anonymous()).unwrap();
    assert!(visible.is_empty());
}
