//! The audit trail service
//!
//! History is never rewritten. Point-in-time views are rebuilt by replaying
//! field edits, and the daily recovery rolls figures back by appending new
//! corrective entries.

use chrono::{Duration, NaiveDate};
use core_kernel::{Clock, Money, OrganizationId, RequestContext, Timezone};
use domain_accounts::{AccountTree, Chart, DottedPath};
use domain_entries::{ExpenseFigures, ExpenseMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::entry::{AuditAction, AuditEntry, AuditField};
use crate::error::AuditError;
use crate::ports::AuditSink;
use crate::status::AuditStatus;

/// Column headers of [`AuditExportRow`]
pub const EXPORT_HEADERS: [&str; 8] = [
    "Data/Hora",
    "Usuário",
    "Plano",
    "Conta",
    "Campo",
    "Valor Anterior",
    "Valor Novo",
    "Tipo",
];

/// Whether an edit was typed by a user or written by a recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Manual,
    Recovery,
}

/// Flat field-edit row for CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditExportRow {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub user_name: String,
    pub chart: Chart,
    pub account_id: DottedPath,
    pub account_name: String,
    pub field: AuditField,
    pub previous_value: Money,
    pub new_value: Money,
    pub kind: EditKind,
}

/// Result of a daily recovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryOutcome {
    /// Local date whose end-of-day state was restored
    pub as_of: NaiveDate,
    /// The figures to adopt as current; rolled-back accounts absent yesterday appear as zero
    pub restored: ExpenseMap,
    /// One status per corrective entry written
    pub corrections: Vec<AuditStatus>,
}

impl RecoveryOutcome {
    pub fn correction_count(&self) -> usize {
        self.corrections.len()
    }

    pub fn audit_failures(&self) -> usize {
        self.corrections.iter().filter(|s| s.is_failed()).count()
    }
}

/// Append-only audit log with replay queries
#[derive(Clone)]
pub struct AuditTrail {
    sink: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    timezone: Timezone,
}

impl AuditTrail {
    pub fn new(sink: Arc<dyn AuditSink>, clock: Arc<dyn Clock>, timezone: Timezone) -> Self {
        Self {
            sink,
            clock,
            timezone,
        }
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Records an action under the caller's own organization
    pub fn record(&self, ctx: &RequestContext, action: AuditAction) -> AuditStatus {
        self.record_for(ctx, &ctx.organization_id, action)
    }

    /// Records an action performed by `ctx` under another organization's log
    ///
    /// Failures are logged and reported in the returned status, never raised.
    pub fn record_for(&self, ctx: &RequestContext, organization_id: &OrganizationId, action: AuditAction) -> AuditStatus {
        let entry = AuditEntry::new(ctx, organization_id.clone(), self.clock.now(), action);
        match self.sink.append(&entry) {
            Ok(()) => AuditStatus::Recorded { entry_id: entry.id },
            Err(e) => {
                warn!(
                    organization_id = %organization_id,
                    action_type = entry.action.action_type(),
                    error = %e,
                    "audit append failed; continuing without audit entry"
                );
                AuditStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Entries oldest first, ties kept in append order
    fn chronological(&self, organization_id: &OrganizationId) -> Result<Vec<AuditEntry>, AuditError> {
        let mut entries = self.sink.list_for_organization(organization_id)?;
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }

    /// Full history of an organization, newest first
    pub fn history_for(&self, organization_id: &OrganizationId) -> Result<Vec<AuditEntry>, AuditError> {
        let mut entries = self.chronological(organization_id)?;
        entries.reverse();
        Ok(entries)
    }

    /// History of one account of `chart`, newest first
    pub fn history_for_account(
        &self,
        organization_id: &OrganizationId,
        chart: Chart,
        account_id: &DottedPath,
    ) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(self
            .history_for(organization_id)?
            .into_iter()
            .filter(|e| e.action.account() == Some((chart, account_id)))
            .collect())
    }

    /// Expense figures as they stood at the end of `date` (local time)
    ///
    /// Replays expense field edits up to the end of that day. An account with
    /// no edit by then is absent from the result; an account edited on only
    /// one field reads zero on the other.
    pub fn snapshot_as_of(&self, organization_id: &OrganizationId, date: NaiveDate) -> Result<ExpenseMap, AuditError> {
        let cutoff = self.timezone.end_of_day(date)?;
        let mut snapshot = ExpenseMap::new();

        for entry in self.chronological(organization_id)? {
            if entry.timestamp > cutoff {
                break;
            }
            if let AuditAction::FieldEdit {
                chart: Chart::Expense,
                account_id,
                field,
                new_value,
                ..
            } = entry.action
            {
                let figures = snapshot.entry(account_id).or_default();
                match field {
                    AuditField::Total => figures.total = new_value,
                    AuditField::Finalistica => figures.finalistica = new_value,
                    AuditField::Value => {}
                }
            }
        }

        Ok(snapshot)
    }

    /// Rolls `current` back to yesterday's end-of-day state
    ///
    /// Every differing field gets a corrective `field_edit` entry with
    /// `is_recovery = true`, previous value = current, new value = yesterday.
    /// Accounts unknown to `tree` are skipped.
    pub fn daily_recovery(
        &self,
        ctx: &RequestContext,
        current: &ExpenseMap,
        tree: &AccountTree,
    ) -> Result<RecoveryOutcome, AuditError> {
        let today = self.timezone.local_date(self.clock.now());
        let yesterday = today - Duration::days(1);
        let snapshot = self.snapshot_as_of(&ctx.organization_id, yesterday)?;

        let ids: BTreeSet<&DottedPath> = current.keys().chain(snapshot.keys()).collect();
        let mut restored = ExpenseMap::new();
        let mut corrections = Vec::new();

        for id in ids {
            let Some(account) = tree.get(id) else {
                continue;
            };
            let now = current.get(id).copied().unwrap_or_default();
            let past = snapshot.get(id).copied().unwrap_or_default();

            for (field, from, to) in [
                (AuditField::Total, now.total, past.total),
                (AuditField::Finalistica, now.finalistica, past.finalistica),
            ] {
                if from != to {
                    corrections.push(self.record(
                        ctx,
                        AuditAction::FieldEdit {
                            chart: Chart::Expense,
                            account_id: id.clone(),
                            account_name: account.name.clone(),
                            field,
                            previous_value: from,
                            new_value: to,
                            is_recovery: true,
                        },
                    ));
                }
            }

            restored.insert(id.clone(), ExpenseFigures::new(past.total, past.finalistica));
        }

        info!(
            organization_id = %ctx.organization_id,
            as_of = %yesterday,
            corrections = corrections.len(),
            "daily recovery computed"
        );

        Ok(RecoveryOutcome {
            as_of: yesterday,
            restored,
            corrections,
        })
    }

    /// Field-edit history as flat rows, newest first
    pub fn export_rows(&self, organization_id: &OrganizationId) -> Result<Vec<AuditExportRow>, AuditError> {
        Ok(self
            .history_for(organization_id)?
            .into_iter()
            .filter_map(|entry| match entry.action {
                AuditAction::FieldEdit {
                    chart,
                    account_id,
                    account_name,
                    field,
                    previous_value,
                    new_value,
                    is_recovery,
                } => Some(AuditExportRow {
                    timestamp: entry.timestamp,
                    user_name: entry.user_name,
                    chart,
                    account_id,
                    account_name,
                    field,
                    previous_value,
                    new_value,
                    kind: if is_recovery {
                        EditKind::Recovery
                    } else {
                        EditKind::Manual
                    },
                }),
                _ => None,
            })
            .collect())
    }
}

impl std::fmt::Debug for AuditTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditTrail")
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}
