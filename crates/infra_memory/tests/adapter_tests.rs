//! Integration tests for infra_memory

use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use core_kernel::{Money, OrganizationId, OrganizationType, PortError, RequestContext, UserId};
use domain_accounts::DottedPath;
use domain_audit::{AuditAction, AuditEntry, AuditSink};
use domain_declaration::{
    Declaration, DeclarationStatus, DeclarationStore, DeclarationTotals, NewDeclaration, ReceiptNumber,
    ResponsibleParty, ResponsibleStore,
};
use domain_entries::{Entries, EntryStore, ExpenseFigures, Organization, OrganizationDirectory, RevenueFigures};
use infra_memory::{MemoryBackend, MemoryDeclarationStore};

fn p(s: &str) -> DottedPath {
    s.parse().unwrap()
}

fn declaration(org: &str, sequence: u32, minutes: i64) -> Declaration {
    Declaration::submitted(NewDeclaration {
        organization_id: org.into(),
        receipt_number: ReceiptNumber::new(2026, sequence),
        delivery_date: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes),
        rectification_count: 0,
        is_rectification: false,
        totals: DeclarationTotals::default(),
        snapshot: Entries::default(),
        responsible: ResponsibleParty::default(),
    })
}

// ============================================================================
// Entries
// ============================================================================

mod entry_tests {
    use super::*;

    #[test]
    fn test_upsert_is_last_write_wins_per_account() {
        let backend = MemoryBackend::new(Vec::new());
        let org = OrganizationId::from("cra-sp");
        let first = ExpenseFigures::new(Money::new(dec!(10)), Money::zero());
        let second = ExpenseFigures::new(Money::new(dec!(20)), Money::new(dec!(5)));

        backend.entries.upsert_expense(&org, &p("1.1"), first).unwrap();
        backend.entries.upsert_expense(&org, &p("1.1"), second).unwrap();
        backend.entries.upsert_expense(&org, &p("1.2"), first).unwrap();

        let expenses = backend.entries.read_expenses(&org).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[&p("1.1")], second);
    }

    #[test]
    fn test_read_all_spans_organizations() {
        let backend = MemoryBackend::new(Vec::new());
        let value = RevenueFigures::new(Money::new(dec!(7)));
        backend.entries.upsert_revenue(&"cra-sp".into(), &p("1.1"), value).unwrap();
        backend.entries.upsert_revenue(&"cra-rj".into(), &p("1.1"), value).unwrap();

        let all = backend.entries.read_all_revenues().unwrap();
        assert_eq!(all.len(), 2);
        assert!(backend.entries.read_all_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_replace_expenses() {
        let backend = MemoryBackend::new(Vec::new());
        let org = OrganizationId::from("cra-sp");
        backend
            .entries
            .upsert_expense(&org, &p("1.1"), ExpenseFigures::new(Money::new(dec!(1)), Money::zero()))
            .unwrap();
        backend.entries.replace_expenses(&org, Default::default()).unwrap();
        assert!(backend.entries.read_expenses(&org).unwrap().is_empty());
    }
}

// ============================================================================
// Declarations
// ============================================================================

mod declaration_tests {
    use super::*;

    #[test]
    fn test_latest_is_most_recent_delivery() {
        let store = MemoryDeclarationStore::new();
        store.insert_declaration(&declaration("cra-sp", 1, 30)).unwrap();
        store.insert_declaration(&declaration("cra-sp", 2, 10)).unwrap();
        store.insert_declaration(&declaration("cra-rj", 3, 60)).unwrap();

        let latest = store.latest_declaration(&"cra-sp".into()).unwrap().unwrap();
        assert_eq!(latest.receipt_number().sequence(), 1);

        let history = store.history(&"cra-sp".into()).unwrap();
        let sequences: Vec<u32> = history.iter().map(|d| d.receipt_number().sequence()).collect();
        assert_eq!(sequences, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_receipt_is_conflict() {
        let store = MemoryDeclarationStore::new();
        store.insert_declaration(&declaration("cra-sp", 9, 0)).unwrap();

        let err = store.insert_declaration(&declaration("cra-rj", 9, 5)).unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_status_only_moves_to_draft() {
        let store = MemoryDeclarationStore::new();
        let stored = store.insert_declaration(&declaration("cra-sp", 1, 0)).unwrap();

        store.update_status(stored.id(), DeclarationStatus::Draft).unwrap();
        let latest = store.latest_declaration(&"cra-sp".into()).unwrap().unwrap();
        assert!(latest.is_draft());

        let err = store
            .update_status(stored.id(), DeclarationStatus::Submitted)
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[test]
    fn test_update_unknown_declaration() {
        let store = MemoryDeclarationStore::new();
        let err = store
            .update_status(core_kernel::DeclarationId::new(), DeclarationStatus::Draft)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_responsible_round_trip() {
        let backend = MemoryBackend::new(Vec::new());
        let org = OrganizationId::from("cra-sp");
        assert!(backend.responsibles.load_responsible(&org).unwrap().is_none());

        let party = ResponsibleParty {
            unit_responsible_name: "João".to_string(),
            ..Default::default()
        };
        backend.responsibles.save_responsible(&org, &party).unwrap();
        assert_eq!(backend.responsibles.load_responsible(&org).unwrap(), Some(party));
    }
}

// ============================================================================
// Audit and directory
// ============================================================================

mod audit_tests {
    use super::*;

    #[test]
    fn test_audit_is_filtered_by_organization_in_append_order() {
        let backend = MemoryBackend::new(Vec::new());
        let ctx = RequestContext::new("cra-sp", UserId::new(), "Ana", OrganizationType::Cra);

        for action in [AuditAction::Login, AuditAction::Logout] {
            backend
                .audit
                .append(&AuditEntry::new(&ctx, ctx.organization_id.clone(), Utc::now(), action))
                .unwrap();
        }
        backend
            .audit
            .append(&AuditEntry::new(&ctx, "cra-rj".into(), Utc::now(), AuditAction::Login))
            .unwrap();

        let entries = backend.audit.list_for_organization(&ctx.organization_id).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::Logout);
        assert_eq!(backend.audit.len().unwrap(), 3);
    }

    #[test]
    fn test_directory_lists_sorted_and_finds() {
        let backend = MemoryBackend::new(vec![
            Organization::new("cra-sp", "CRA-SP", OrganizationType::Cra),
            Organization::new("cfa", "CFA", OrganizationType::Cfa),
        ]);
        backend
            .organizations
            .register(Organization::new("cra-mg", "CRA-MG", OrganizationType::Cra))
            .unwrap();

        let ids: Vec<String> = backend
            .organizations
            .list_organizations()
            .unwrap()
            .into_iter()
            .map(|o| o.id.to_string())
            .collect();
        assert_eq!(ids, vec!["cfa", "cra-mg", "cra-sp"]);

        assert!(backend.organizations.find_organization(&"cra-xx".into()).unwrap_err().is_not_found());
    }
}
