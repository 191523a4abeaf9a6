//! Declaration lifecycle service
//!
//! Per organization:
//!
//! ```text
//! NoDeclaration ──submit──▶ Submitted ──unlock──▶ Draft ──submit──▶ Submitted(n+1) ──▶ …
//! ```
//!
//! Non-CFA callers may only submit or self-unlock up to the declaration
//! deadline, except that a `Draft` (unlocked) organization may always submit.
//! The CFA may unlock any organization at any time and is never subject to
//! the deadline.

use chrono::{DateTime, Datelike, Utc};
use core_kernel::{Clock, Deadline, OrganizationId, PortError, RequestContext, Timezone};
use domain_accounts::ChartOfAccounts;
use domain_audit::{AuditAction, AuditStatus, AuditTrail, Audited};
use domain_entries::{Entries, Figures, Organization};
use domain_reporting::AggregationEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::declaration::{Declaration, DeclarationStatus, DeclarationTotals, NewDeclaration};
use crate::error::DeclarationError;
use crate::ports::DeclarationStore;
use crate::receipt::{RandomReceipts, ReceiptNumber, ReceiptNumberGenerator};
use crate::responsible::ResponsibleParty;

/// Submissions give up after this many receipt-number collisions
const RECEIPT_ATTEMPTS: u32 = 3;

/// Display severity of a [`DeclarationState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "green",
            Severity::Warning => "amber",
            Severity::Danger => "red",
            Severity::Info => "blue",
            Severity::Neutral => "gray",
        }
    }
}

/// Read model of where an organization stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DeclarationState {
    Submitted {
        receipt_number: ReceiptNumber,
        delivery_date: DateTime<Utc>,
        is_rectification: bool,
    },
    /// Unlocked; a new submission is required
    Draft { receipt_number: ReceiptNumber },
    /// Deadline passed without any declaration
    Missed,
    /// Figures entered, nothing submitted yet
    Open,
    NotStarted,
}

impl DeclarationState {
    pub fn severity(&self) -> Severity {
        match self {
            DeclarationState::Submitted { .. } => Severity::Success,
            DeclarationState::Draft { .. } => Severity::Warning,
            DeclarationState::Missed => Severity::Danger,
            DeclarationState::Open => Severity::Info,
            DeclarationState::NotStarted => Severity::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeclarationState::Submitted {
                is_rectification: true,
                ..
            } => "Entregue (Retificada)",
            DeclarationState::Submitted { .. } => "Entregue",
            DeclarationState::Draft { .. } => "Em retificação - Novo envio necessário",
            DeclarationState::Missed => "Não Entregue",
            DeclarationState::Open => "Em Preenchimento",
            DeclarationState::NotStarted => "Em Aberto",
        }
    }
}

/// How an organization's latest delivery is classified in the CFA overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum DeliveryKind {
    Original,
    Rectification(u32),
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub organization_id: OrganizationId,
    pub organization_name: String,
    pub kind: DeliveryKind,
    pub receipt_number: Option<ReceiptNumber>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub status: Option<DeclarationStatus>,
}

/// Delivery status of every regional organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub rows: Vec<OverviewRow>,
    pub delivered: usize,
    pub pending: usize,
}

pub struct DeclarationLifecycle {
    store: Arc<dyn DeclarationStore>,
    audit: AuditTrail,
    chart: Arc<ChartOfAccounts>,
    receipts: Arc<dyn ReceiptNumberGenerator>,
    clock: Arc<dyn Clock>,
    deadline: Deadline,
}

impl DeclarationLifecycle {
    pub fn new(
        store: Arc<dyn DeclarationStore>,
        audit: AuditTrail,
        chart: Arc<ChartOfAccounts>,
        clock: Arc<dyn Clock>,
        deadline: Deadline,
    ) -> Self {
        Self {
            store,
            audit,
            chart,
            receipts: Arc::new(RandomReceipts),
            clock,
            deadline,
        }
    }

    /// Replaces the default random receipt generator
    pub fn with_receipts(mut self, receipts: Arc<dyn ReceiptNumberGenerator>) -> Self {
        self.receipts = receipts;
        self
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    fn timezone(&self) -> Timezone {
        self.audit.timezone()
    }

    fn deadline_open_for(&self, ctx: &RequestContext, now: DateTime<Utc>) -> bool {
        ctx.is_cfa() || self.deadline.is_open(now)
    }

    /// Freezes `entries` into a new declaration for the caller's organization
    ///
    /// The declaration is persisted before the audit entry is written; a
    /// failed audit write is reported in the returned status and does not
    /// undo the submission.
    pub fn submit(
        &self,
        ctx: &RequestContext,
        entries: &Entries,
        responsible: &ResponsibleParty,
    ) -> Result<Audited<Declaration>, DeclarationError> {
        let missing = responsible.missing_fields();
        if !missing.is_empty() {
            return Err(DeclarationError::Validation { missing });
        }

        let organization_id = &ctx.organization_id;
        let latest = self.store.latest_declaration(organization_id)?;
        let now = self.clock.now();

        let unlocked = latest.as_ref().is_some_and(Declaration::is_draft);
        if !unlocked && !self.deadline_open_for(ctx, now) {
            debug!(organization_id = %organization_id, "submission refused after deadline");
            return Err(DeclarationError::Deadline {
                deadline: self.deadline,
            });
        }

        let rectification_count = latest.as_ref().map_or(0, |d| d.rectification_count() + 1);
        let is_rectification = latest.is_some();
        let year = self.timezone().local_date(now).year();
        let template = NewDeclaration {
            organization_id: organization_id.clone(),
            receipt_number: self.receipts.next(year),
            delivery_date: now,
            rectification_count,
            is_rectification,
            totals: self.totals(entries)?,
            snapshot: entries.clone(),
            responsible: responsible.clone(),
        };

        let mut attempt = 1;
        let mut declaration = Declaration::submitted(template.clone());
        let stored = loop {
            match self.store.insert_declaration(&declaration) {
                Err(PortError::Conflict { message }) if attempt < RECEIPT_ATTEMPTS => {
                    warn!(
                        organization_id = %organization_id,
                        receipt_number = %declaration.receipt_number(),
                        reason = %message,
                        "receipt number rejected, drawing another"
                    );
                    attempt += 1;
                    declaration = Declaration::submitted(NewDeclaration {
                        receipt_number: self.receipts.next(year),
                        ..template.clone()
                    });
                }
                result => break result?,
            }
        };

        let action = if is_rectification {
            AuditAction::DeclarationRectified {
                declaration_id: stored.id(),
                receipt_number: stored.receipt_number().to_string(),
                rectification_count,
            }
        } else {
            AuditAction::DeclarationSubmitted {
                declaration_id: stored.id(),
                receipt_number: stored.receipt_number().to_string(),
            }
        };
        let audit = self.audit.record(ctx, action);

        info!(
            organization_id = %organization_id,
            receipt_number = %stored.receipt_number(),
            rectification_count,
            "declaration submitted"
        );
        Ok(Audited::new(stored, audit))
    }

    /// Grand totals of both charts, cross-checked against the top-level rows
    pub fn totals(&self, entries: &Entries) -> Result<DeclarationTotals, DeclarationError> {
        let revenue = AggregationEngine::new(&self.chart.revenue, &entries.revenues).verify_grand_total()?;
        let expense = AggregationEngine::new(&self.chart.expense, &entries.expenses).verify_grand_total()?;
        Ok(DeclarationTotals {
            revenue: revenue.headline(),
            expense: expense.total,
            finalistica: expense.finalistica,
            apoio: expense.apoio(),
        })
    }

    /// Reopens an organization's submitted declaration on behalf of the CFA
    ///
    /// No deadline applies. Unlocking a declaration that is already a draft
    /// succeeds without writing anything.
    pub fn cfa_unlock(
        &self,
        ctx: &RequestContext,
        organization_id: &OrganizationId,
    ) -> Result<Audited<Declaration>, DeclarationError> {
        if !ctx.is_cfa() {
            warn!(
                caller = %ctx.organization_id,
                target = %organization_id,
                "non-CFA caller attempted a CFA unlock"
            );
            return Err(DeclarationError::Unauthorized(format!(
                "only the CFA may unlock {organization_id}"
            )));
        }

        self.unlock(ctx, organization_id, |declaration| {
            AuditAction::RectificationUnlockedByCfa {
                declaration_id: declaration.id(),
                receipt_number: declaration.receipt_number().to_string(),
                unlocked_by: ctx.organization_id.clone(),
            }
        })
    }

    /// Reopens the caller's own declaration while the deadline is open
    pub fn self_unlock(&self, ctx: &RequestContext) -> Result<Audited<Declaration>, DeclarationError> {
        if !self.deadline_open_for(ctx, self.clock.now()) {
            return Err(DeclarationError::Deadline {
                deadline: self.deadline,
            });
        }

        self.unlock(ctx, &ctx.organization_id, |declaration| {
            AuditAction::RectificationUnlockedByUser {
                declaration_id: declaration.id(),
                receipt_number: declaration.receipt_number().to_string(),
            }
        })
    }

    fn unlock(
        &self,
        ctx: &RequestContext,
        organization_id: &OrganizationId,
        action: impl FnOnce(&Declaration) -> AuditAction,
    ) -> Result<Audited<Declaration>, DeclarationError> {
        let mut declaration = self
            .store
            .latest_declaration(organization_id)?
            .ok_or_else(|| DeclarationError::NotFound(organization_id.clone()))?;

        if declaration.is_draft() {
            debug!(organization_id = %organization_id, "declaration already unlocked");
            return Ok(Audited::new(declaration, AuditStatus::NotRequired));
        }

        self.store
            .update_status(declaration.id(), DeclarationStatus::Draft)?;
        declaration.set_status(DeclarationStatus::Draft)?;

        let audit = self.audit.record_for(ctx, organization_id, action(&declaration));
        info!(
            organization_id = %organization_id,
            unlocked_by = %ctx.organization_id,
            receipt_number = %declaration.receipt_number(),
            "declaration unlocked for rectification"
        );
        Ok(Audited::new(declaration, audit))
    }

    pub fn active(&self, organization_id: &OrganizationId) -> Result<Option<Declaration>, DeclarationError> {
        Ok(self.store.latest_declaration(organization_id)?)
    }

    /// Every declaration of the organization, newest first
    pub fn history(&self, organization_id: &OrganizationId) -> Result<Vec<Declaration>, DeclarationError> {
        Ok(self.store.history(organization_id)?)
    }

    /// Current state of `organization` given its live entries
    pub fn status(&self, organization: &Organization, entries: &Entries) -> Result<DeclarationState, DeclarationError> {
        let state = match self.store.latest_declaration(&organization.id)? {
            Some(d) if d.is_submitted() => DeclarationState::Submitted {
                receipt_number: d.receipt_number().clone(),
                delivery_date: d.delivery_date(),
                is_rectification: d.is_rectification(),
            },
            Some(d) => DeclarationState::Draft {
                receipt_number: d.receipt_number().clone(),
            },
            None if !organization.is_cfa() && self.deadline.has_passed(self.clock.now()) => DeclarationState::Missed,
            None if entries.has_figures() => DeclarationState::Open,
            None => DeclarationState::NotStarted,
        };
        Ok(state)
    }

    /// Delivery summary of every regional organization in `organizations`
    pub fn overview(&self, organizations: &[Organization]) -> Result<Overview, DeclarationError> {
        let mut overview = Overview::default();

        for organization in organizations.iter().filter(|o| !o.is_cfa()) {
            let latest = self.store.latest_declaration(&organization.id)?;
            let row = match latest {
                Some(d) => OverviewRow {
                    organization_id: organization.id.clone(),
                    organization_name: organization.name.clone(),
                    kind: if d.is_rectification() {
                        DeliveryKind::Rectification(d.rectification_count())
                    } else {
                        DeliveryKind::Original
                    },
                    receipt_number: Some(d.receipt_number().clone()),
                    delivery_date: Some(d.delivery_date()),
                    status: Some(d.status()),
                },
                None => OverviewRow {
                    organization_id: organization.id.clone(),
                    organization_name: organization.name.clone(),
                    kind: DeliveryKind::Pending,
                    receipt_number: None,
                    delivery_date: None,
                    status: None,
                },
            };

            if row.kind == DeliveryKind::Pending {
                overview.pending += 1;
            } else {
                overview.delivered += 1;
            }
            overview.rows.push(row);
        }

        Ok(overview)
    }
}

impl std::fmt::Debug for DeclarationLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclarationLifecycle")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
