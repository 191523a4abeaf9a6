//! Field-level editing of an organization's own entries
//!
//! Every save touches one account and one field. Writes are refused while the
//! organization's active declaration is submitted, and for regional units
//! after the deadline unless the CFA reopened the declaration.

use chrono::{DateTime, Utc};
use core_kernel::{Clock, Deadline, Money, RequestContext};
use domain_accounts::{Account, AccountTree, Chart, ChartOfAccounts, DottedPath};
use domain_audit::{AuditAction, AuditField, AuditStatus, AuditTrail};
use domain_entries::{
    check_expense, EntryError, EntryStore, EntryWarning, ExpenseField, ExpenseFigures, RevenueFigures,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DeclarationError;
use crate::ports::DeclarationStore;

/// Accounts whose finalística always equals their total
pub const DEFAULT_FULL_FINALISTICA_ACCOUNTS: [&str; 3] = ["1.5.1.1", "1.7.1.10", "1.12.1.5"];

#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub expense_deadline: Deadline,
    pub revenue_deadline: Deadline,
    pub full_finalistica_accounts: BTreeSet<DottedPath>,
}

/// Result of one field save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome<F> {
    pub account_id: DottedPath,
    pub figures: F,
    /// One status per audited field change; empty when nothing changed
    pub audits: Vec<AuditStatus>,
    pub warning: Option<EntryWarning>,
}

impl<F> EditOutcome<F> {
    pub fn is_unchanged(&self) -> bool {
        self.audits.is_empty()
    }

    pub fn audit_failures(&self) -> usize {
        self.audits.iter().filter(|s| s.is_failed()).count()
    }
}

pub struct EntryEditor {
    entries: Arc<dyn EntryStore>,
    declarations: Arc<dyn DeclarationStore>,
    audit: AuditTrail,
    chart: Arc<ChartOfAccounts>,
    clock: Arc<dyn Clock>,
    settings: EditorSettings,
}

impl EntryEditor {
    pub fn new(
        entries: Arc<dyn EntryStore>,
        declarations: Arc<dyn DeclarationStore>,
        audit: AuditTrail,
        chart: Arc<ChartOfAccounts>,
        clock: Arc<dyn Clock>,
        settings: EditorSettings,
    ) -> Self {
        Self {
            entries,
            declarations,
            audit,
            chart,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn is_full_finalistica(&self, account_id: &DottedPath) -> bool {
        self.settings.full_finalistica_accounts.contains(account_id)
    }

    /// Fails if the caller may not currently change its own entries
    pub fn ensure_editable(&self, ctx: &RequestContext, deadline: Deadline) -> Result<(), DeclarationError> {
        let latest = self.declarations.latest_declaration(&ctx.organization_id)?;
        if latest.as_ref().is_some_and(|d| d.is_submitted()) {
            return Err(DeclarationError::Locked(ctx.organization_id.clone()));
        }

        let reopened = latest.as_ref().is_some_and(|d| d.is_draft());
        if !ctx.is_cfa() && !reopened && deadline.has_passed(self.now()) {
            return Err(DeclarationError::Deadline { deadline });
        }
        Ok(())
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn analytical<'t>(tree: &'t AccountTree, account_id: &DottedPath) -> Result<&'t Account, DeclarationError> {
        let account = tree.require(account_id).map_err(EntryError::from)?;
        if !account.is_analytical() {
            return Err(EntryError::NotAnalytical(account_id.to_string()).into());
        }
        Ok(account)
    }

    /// Saves one expense field
    ///
    /// Editing the total of a full-finalística account also sets its
    /// finalística; editing that finalística directly is refused.
    pub fn edit_expense(
        &self,
        ctx: &RequestContext,
        account_id: &DottedPath,
        field: ExpenseField,
        value: Money,
    ) -> Result<EditOutcome<ExpenseFigures>, DeclarationError> {
        let account = Self::analytical(&self.chart.expense, account_id)?;
        let auto_fill = self.is_full_finalistica(account_id);
        if auto_fill && field == ExpenseField::Finalistica {
            return Err(EntryError::ReadOnlyField {
                account_id: account_id.to_string(),
                field: field.to_string(),
            }
            .into());
        }
        self.ensure_editable(ctx, self.settings.expense_deadline)?;

        let current = self
            .entries
            .read_expenses(&ctx.organization_id)?
            .get(account_id)
            .copied()
            .unwrap_or_default();
        let mut updated = current;
        field.write(&mut updated, value);
        if auto_fill {
            updated.finalistica = updated.total;
        }

        let warning = check_expense(account_id, &account.name, &updated);
        if updated == current {
            debug!(organization_id = %ctx.organization_id, account_id = %account_id, "expense unchanged");
            return Ok(EditOutcome {
                account_id: account_id.clone(),
                figures: current,
                audits: Vec::new(),
                warning,
            });
        }

        self.entries
            .upsert_expense(&ctx.organization_id, account_id, updated)?;

        let mut audits = Vec::new();
        for (audit_field, before, after) in [
            (AuditField::Total, current.total, updated.total),
            (AuditField::Finalistica, current.finalistica, updated.finalistica),
        ] {
            if before != after {
                audits.push(self.record_edit(ctx, Chart::Expense, account, audit_field, before, after));
            }
        }

        info!(
            organization_id = %ctx.organization_id,
            account_id = %account_id,
            field = %field,
            "expense saved"
        );
        Ok(EditOutcome {
            account_id: account_id.clone(),
            figures: updated,
            audits,
            warning,
        })
    }

    /// Saves one revenue value
    pub fn edit_revenue(
        &self,
        ctx: &RequestContext,
        account_id: &DottedPath,
        value: Money,
    ) -> Result<EditOutcome<RevenueFigures>, DeclarationError> {
        let account = Self::analytical(&self.chart.revenue, account_id)?;
        self.ensure_editable(ctx, self.settings.revenue_deadline)?;

        let current = self
            .entries
            .read_revenues(&ctx.organization_id)?
            .get(account_id)
            .copied()
            .unwrap_or_default();
        let updated = RevenueFigures::new(value);
        if updated == current {
            return Ok(EditOutcome {
                account_id: account_id.clone(),
                figures: current,
                audits: Vec::new(),
                warning: None,
            });
        }

        self.entries
            .upsert_revenue(&ctx.organization_id, account_id, updated)?;
        let audit = self.record_edit(ctx, Chart::Revenue, account, AuditField::Value, current.value, updated.value);

        info!(organization_id = %ctx.organization_id, account_id = %account_id, "revenue saved");
        Ok(EditOutcome {
            account_id: account_id.clone(),
            figures: updated,
            audits: vec![audit],
            warning: None,
        })
    }

    fn record_edit(
        &self,
        ctx: &RequestContext,
        chart: Chart,
        account: &Account,
        field: AuditField,
        previous_value: Money,
        new_value: Money,
    ) -> AuditStatus {
        self.audit.record(
            ctx,
            AuditAction::FieldEdit {
                chart,
                account_id: account.id.clone(),
                account_name: account.name.clone(),
                field,
                previous_value,
                new_value,
                is_recovery: false,
            },
        )
    }
}

impl std::fmt::Debug for EntryEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryEditor")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
