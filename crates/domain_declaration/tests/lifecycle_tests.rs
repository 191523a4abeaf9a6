//! Integration tests for domain_declaration

use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::collections::BTreeSet;
use std::sync::Arc;

use core_kernel::{Deadline, FixedClock, Money, OrganizationType, RequestContext, Timezone, UserId};
use domain_accounts::{ChartOfAccounts, DottedPath};
use domain_audit::{AuditTrail, MockAuditSink};
use domain_declaration::{
    DeclarationError, DeclarationLifecycle, DocType, EditorSettings, EntryEditor, MockDeclarationStore,
    ResponsibleField, ResponsibleParty, SequentialReceipts,
};
use domain_entries::{EntryStore, ExpenseField, MockEntryStore};

const EXPENSES: &str = r#"[
    {"id": "1", "name": "Despesas Correntes", "type": "Sintética", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1", "name": "Pessoal", "type": "Sintética", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1.1", "name": "Remuneração", "type": "Sintética", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1.1.1", "name": "Salários", "type": "Analítica", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1.1.2", "name": "Férias", "type": "Analítica", "group": "Pessoal", "subgroup": ""},
    {"id": "2", "name": "Despesas de Capital", "type": "Sintética", "group": "Investimentos", "subgroup": ""},
    {"id": "2.1", "name": "Equipamentos", "type": "Analítica", "group": "Investimentos", "subgroup": ""}
]"#;

const REVENUES: &str = r#"[
    {"id": "1", "name": "Receitas Correntes", "type": "Sintética", "group": "Receitas", "subgroup": ""},
    {"id": "1.1", "name": "Anuidades", "type": "Analítica", "group": "Receitas", "subgroup": ""}
]"#;

struct World {
    entries: Arc<MockEntryStore>,
    sink: Arc<MockAuditSink>,
    clock: Arc<FixedClock>,
    lifecycle: DeclarationLifecycle,
    editor: EntryEditor,
}

fn p(s: &str) -> DottedPath {
    s.parse().unwrap()
}

fn world() -> World {
    let tz = Timezone::sao_paulo();
    let deadline = Deadline::parse_local("2026-03-31T23:59:59", tz).unwrap();
    let chart = Arc::new(ChartOfAccounts::from_json(REVENUES, EXPENSES).unwrap());
    let entries = Arc::new(MockEntryStore::new());
    let declarations = Arc::new(MockDeclarationStore::new());
    let sink = Arc::new(MockAuditSink::new());
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 2, 13, 0, 0).unwrap()));
    let audit = AuditTrail::new(sink.clone(), clock.clone(), tz);

    let lifecycle = DeclarationLifecycle::new(declarations.clone(), audit.clone(), chart.clone(), clock.clone(), deadline)
        .with_receipts(Arc::new(SequentialReceipts::starting_at(100)));
    let editor = EntryEditor::new(
        entries.clone(),
        declarations,
        audit,
        chart,
        clock.clone(),
        EditorSettings {
            expense_deadline: deadline,
            revenue_deadline: Deadline::parse_local("2026-03-15T23:59:59", tz).unwrap(),
            full_finalistica_accounts: BTreeSet::new(),
        },
    );

    World {
        entries,
        sink,
        clock,
        lifecycle,
        editor,
    }
}

fn cra_sp() -> RequestContext {
    RequestContext::new("cra-sp", UserId::new(), "Ana", OrganizationType::Cra)
}

fn cfa() -> RequestContext {
    RequestContext::new("cfa", UserId::new(), "Carlos", OrganizationType::Cfa)
}

fn responsible() -> ResponsibleParty {
    ResponsibleParty {
        unit_responsible_name: "João Pereira".to_string(),
        unit_responsible_cra_number: "CRA-SP 0001".to_string(),
        data_responsible_name: "Ana Lima".to_string(),
        data_responsible_role: "Contadora".to_string(),
        data_responsible_doc_type: DocType::Crc,
        data_responsible_doc_number: "1SP000001".to_string(),
        cnpj: Some("00.000.000/0001-91".to_string()),
    }
}

fn enter(w: &World, ctx: &RequestContext, account: &str, total: Money, finalistica: Money) {
    w.editor
        .edit_expense(ctx, &p(account), ExpenseField::Total, total)
        .unwrap();
    w.editor
        .edit_expense(ctx, &p(account), ExpenseField::Finalistica, finalistica)
        .unwrap();
}

fn submit(w: &World, ctx: &RequestContext) -> Result<domain_declaration::Declaration, DeclarationError> {
    let entries = w.entries.read_entries(&ctx.organization_id)?;
    Ok(w.lifecycle.submit(ctx, &entries, &responsible())?.into_value())
}

// ============================================================================
// Submission and rectification
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_totals_come_from_aggregation() {
        let w = world();
        let ctx = cra_sp();
        enter(&w, &ctx, "1.1.1.1", Money::new(dec!(100)), Money::new(dec!(60)));
        enter(&w, &ctx, "1.1.1.2", Money::new(dec!(50)), Money::new(dec!(50)));

        let declaration = submit(&w, &ctx).unwrap();
        let totals = declaration.totals();
        assert_eq!(totals.expense, Money::new(dec!(150)));
        assert_eq!(totals.finalistica, Money::new(dec!(110)));
        assert_eq!(totals.apoio, Money::new(dec!(40)));
        assert_eq!(totals.revenue, Money::zero());
    }

    #[test]
    fn test_rectification_count_has_no_gaps() {
        let w = world();
        let ctx = cra_sp();

        for expected in 0..4u32 {
            let declaration = submit(&w, &ctx).unwrap();
            assert_eq!(declaration.rectification_count(), expected);
            assert_eq!(declaration.is_rectification(), expected > 0);
            w.lifecycle.cfa_unlock(&cfa(), &ctx.organization_id).unwrap();
            w.clock.advance(Duration::minutes(10));
        }

        let counts: Vec<u32> = w
            .lifecycle
            .history(&ctx.organization_id)
            .unwrap()
            .iter()
            .rev()
            .map(|d| d.rectification_count())
            .collect();
        assert_eq!(counts, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rectification_keeps_prior_receipt() {
        let w = world();
        let ctx = cra_sp();

        let first = submit(&w, &ctx).unwrap();
        w.lifecycle.cfa_unlock(&cfa(), &ctx.organization_id).unwrap();
        w.clock.advance(Duration::hours(2));
        let second = submit(&w, &ctx).unwrap();

        assert_eq!(second.rectification_count(), 1);
        assert!(second.is_rectification());

        let history = w.lifecycle.history(&ctx.organization_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].receipt_number(), first.receipt_number());
        assert_ne!(history[0].receipt_number(), first.receipt_number());
    }

    #[test]
    fn test_validation_names_every_missing_field() {
        let w = world();
        let mut party = responsible();
        party.unit_responsible_cra_number = String::new();
        party.data_responsible_name = " ".to_string();

        let err = w
            .lifecycle
            .submit(&cra_sp(), &Default::default(), &party)
            .unwrap_err();
        match err {
            DeclarationError::Validation { missing } => assert_eq!(
                missing,
                vec![
                    ResponsibleField::UnitResponsibleCraNumber,
                    ResponsibleField::DataResponsibleName
                ]
            ),
            other => panic!("unexpected error {other:?}"),
        }
    }
}

// ============================================================================
// Snapshot immutability
// ============================================================================

mod snapshot_tests {
    use super::*;

    #[test]
    fn test_snapshot_survives_later_edits() {
        let w = world();
        let ctx = cra_sp();
        enter(&w, &ctx, "2.1", Money::new(dec!(500)), Money::new(dec!(100)));

        let declaration = submit(&w, &ctx).unwrap();
        w.lifecycle.self_unlock(&ctx).unwrap();
        enter(&w, &ctx, "2.1", Money::new(dec!(900)), Money::new(dec!(100)));

        let reloaded = w.lifecycle.history(&ctx.organization_id).unwrap().remove(0);
        assert_eq!(reloaded.id(), declaration.id());
        assert_eq!(reloaded.snapshot(), declaration.snapshot());
        assert_eq!(reloaded.snapshot().expenses[&p("2.1")].total, Money::new(dec!(500)));
    }
}

// ============================================================================
// Unlocks and deadline
// ============================================================================

mod unlock_tests {
    use super::*;

    #[test]
    fn test_cfa_unlock_is_idempotent() {
        let w = world();
        let ctx = cra_sp();
        submit(&w, &ctx).unwrap();
        let before = w.sink.entries().len();

        let first = w.lifecycle.cfa_unlock(&cfa(), &ctx.organization_id).unwrap();
        let second = w.lifecycle.cfa_unlock(&cfa(), &ctx.organization_id).unwrap();

        assert!(first.audit.is_recorded());
        assert_eq!(second.audit, domain_audit::AuditStatus::NotRequired);
        assert_eq!(w.sink.entries().len(), before + 1);

        let unlock = w.sink.entries().pop().unwrap();
        assert_eq!(unlock.organization_id, ctx.organization_id);
        assert_eq!(unlock.action.action_type(), "rectification_unlocked_by_cfa");
    }

    #[test]
    fn test_past_deadline_without_declaration_fails() {
        let w = world();
        w.clock.set(Utc.with_ymd_and_hms(2026, 4, 5, 12, 0, 0).unwrap());

        let err = submit(&w, &cra_sp()).unwrap_err();
        assert!(matches!(err, DeclarationError::Deadline { .. }));
    }

    #[test]
    fn test_past_deadline_with_draft_succeeds() {
        let w = world();
        let ctx = cra_sp();
        submit(&w, &ctx).unwrap();
        w.clock.set(Utc.with_ymd_and_hms(2026, 4, 5, 12, 0, 0).unwrap());

        assert!(matches!(
            submit(&w, &ctx).unwrap_err(),
            DeclarationError::Deadline { .. }
        ));

        w.lifecycle.cfa_unlock(&cfa(), &ctx.organization_id).unwrap();
        enter(&w, &ctx, "1.1.1.1", Money::new(dec!(10)), Money::zero());
        let rectified = submit(&w, &ctx).unwrap();
        assert_eq!(rectified.rectification_count(), 1);
    }

    #[test]
    fn test_entries_locked_after_submission() {
        let w = world();
        let ctx = cra_sp();
        submit(&w, &ctx).unwrap();

        let err = w
            .editor
            .edit_expense(&ctx, &p("2.1"), ExpenseField::Total, Money::new(dec!(1)))
            .unwrap_err();
        assert!(matches!(err, DeclarationError::Locked(_)));
        assert!(err.is_user_facing());
    }
}
