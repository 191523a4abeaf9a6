//! The portal facade
//!
//! `Portal` wires the account charts, the storage ports and the domain
//! engines into the operations a caller performs on behalf of one
//! `RequestContext`. It adds the cross-cutting rules no single engine owns:
//! only the CFA reads other organizations, and the responsible-party form is
//! loaded from storage at submission time.

use core_kernel::{Clock, Money, OrganizationId, RequestContext};
use domain_accounts::{Chart, ChartOfAccounts, DottedPath};
use domain_audit::{
    AuditAction, AuditEntry, AuditExportRow, AuditSink, AuditStatus, AuditTrail, Audited, RecoveryOutcome,
};
use domain_declaration::{
    Declaration, DeclarationLifecycle, DeclarationState, DeclarationStore, EditOutcome,
    EntryEditor, Overview, ReceiptNumberGenerator, ResponsibleParty, ResponsibleStore,
};
use domain_entries::{
    validate_expenses, Entries, EntryStore, EntryWarning, ExpenseField, ExpenseFigures, ExpenseMap, Organization,
    OrganizationDirectory, RevenueFigures, RevenueMap,
};
use domain_reporting::{
    bi_headers, bi_rows, AccountRow, AggregationEngine, BiRow, ComparisonReport, ConsolidationEngine,
    OrganizationTotal, Sampling, Scope,
};
use infra_memory::MemoryBackend;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::PortalConfig;
use crate::error::PortalError;

/// Storage collaborators behind the portal
#[derive(Clone)]
pub struct PortalPorts {
    pub entries: Arc<dyn EntryStore>,
    pub declarations: Arc<dyn DeclarationStore>,
    pub responsibles: Arc<dyn ResponsibleStore>,
    pub audit: Arc<dyn AuditSink>,
    pub organizations: Arc<dyn OrganizationDirectory>,
}

impl From<&MemoryBackend> for PortalPorts {
    fn from(backend: &MemoryBackend) -> Self {
        Self {
            entries: backend.entries.clone(),
            declarations: backend.declarations.clone(),
            responsibles: backend.responsibles.clone(),
            audit: backend.audit.clone(),
            organizations: backend.organizations.clone(),
        }
    }
}

/// BI export: one header row plus one row per regional organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiExport {
    pub headers: Vec<String>,
    pub rows: Vec<BiRow>,
}

pub struct Portal {
    chart: Arc<ChartOfAccounts>,
    entries: Arc<dyn EntryStore>,
    responsibles: Arc<dyn ResponsibleStore>,
    organizations: Arc<dyn OrganizationDirectory>,
    audit: AuditTrail,
    lifecycle: DeclarationLifecycle,
    editor: EntryEditor,
}

impl Portal {
    /// Wires a portal over arbitrary port implementations
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Core` if a deadline, the timezone or an
    /// auto-fill account id in `config` does not parse.
    pub fn new(
        config: &PortalConfig,
        chart: ChartOfAccounts,
        ports: PortalPorts,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PortalError> {
        let timezone = config.timezone()?;
        let settings = config.editor_settings()?;
        let chart = Arc::new(chart);
        let audit = AuditTrail::new(ports.audit, clock.clone(), timezone);

        let lifecycle = DeclarationLifecycle::new(
            ports.declarations.clone(),
            audit.clone(),
            chart.clone(),
            clock.clone(),
            settings.expense_deadline,
        );
        let editor = EntryEditor::new(
            ports.entries.clone(),
            ports.declarations,
            audit.clone(),
            chart.clone(),
            clock,
            settings,
        );

        info!(
            timezone = timezone.name(),
            deadline = %lifecycle.deadline(),
            expense_accounts = chart.expense.len(),
            revenue_accounts = chart.revenue.len(),
            "portal ready"
        );

        Ok(Self {
            chart,
            entries: ports.entries,
            responsibles: ports.responsibles,
            organizations: ports.organizations,
            audit,
            lifecycle,
            editor,
        })
    }

    /// A portal over fresh in-memory adapters, returned alongside them
    pub fn in_memory(
        config: &PortalConfig,
        chart: ChartOfAccounts,
        organizations: Vec<Organization>,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, MemoryBackend), PortalError> {
        let backend = MemoryBackend::new(organizations);
        let portal = Self::new(config, chart, PortalPorts::from(&backend), clock)?;
        Ok((portal, backend))
    }

    pub fn with_receipts(mut self, receipts: Arc<dyn ReceiptNumberGenerator>) -> Self {
        self.lifecycle = self.lifecycle.with_receipts(receipts);
        self
    }

    /// Reads both chart files named in `config`
    pub fn load_chart(config: &PortalConfig) -> Result<ChartOfAccounts, PortalError> {
        let revenue = read_chart_file("revenue_chart_path", config.revenue_chart_path.as_deref())?;
        let expense = read_chart_file("expense_chart_path", config.expense_chart_path.as_deref())?;
        Ok(ChartOfAccounts::from_json(&revenue, &expense)?)
    }

    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    pub fn lifecycle(&self) -> &DeclarationLifecycle {
        &self.lifecycle
    }

    pub fn editor(&self) -> &EntryEditor {
        &self.editor
    }

    pub fn audit_trail(&self) -> &AuditTrail {
        &self.audit
    }

    fn require_cfa(&self, ctx: &RequestContext, what: &str) -> Result<(), PortalError> {
        if ctx.is_cfa() {
            return Ok(());
        }
        warn!(organization_id = %ctx.organization_id, what, "cross-organization read refused");
        Err(PortalError::Forbidden(format!("{what} is restricted to the CFA")))
    }

    fn own_organization(&self, ctx: &RequestContext) -> Result<Organization, PortalError> {
        match self.organizations.find_organization(&ctx.organization_id) {
            Ok(organization) => Ok(organization),
            Err(e) if e.is_not_found() => Ok(Organization::new(
                ctx.organization_id.clone(),
                ctx.organization_id.as_str(),
                ctx.organization_type,
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Every organization except the CFA, in directory order
    pub fn regional_organizations(&self) -> Result<Vec<Organization>, PortalError> {
        Ok(self
            .organizations
            .list_organizations()?
            .into_iter()
            .filter(|o| !o.is_cfa())
            .collect())
    }

    // ------------------------------------------------------------------
    // Own entries
    // ------------------------------------------------------------------

    pub fn edit_expense(
        &self,
        ctx: &RequestContext,
        account_id: &DottedPath,
        field: ExpenseField,
        value: Money,
    ) -> Result<EditOutcome<ExpenseFigures>, PortalError> {
        Ok(self.editor.edit_expense(ctx, account_id, field, value)?)
    }

    pub fn edit_revenue(
        &self,
        ctx: &RequestContext,
        account_id: &DottedPath,
        value: Money,
    ) -> Result<EditOutcome<RevenueFigures>, PortalError> {
        Ok(self.editor.edit_revenue(ctx, account_id, value)?)
    }

    pub fn own_entries(&self, ctx: &RequestContext) -> Result<Entries, PortalError> {
        Ok(self.entries.read_entries(&ctx.organization_id)?)
    }

    /// The caller's expense grid, collapsed rows already removed
    pub fn expense_rows(&self, ctx: &RequestContext) -> Result<Vec<AccountRow<ExpenseFigures>>, PortalError> {
        let expenses = self.entries.read_expenses(&ctx.organization_id)?;
        Ok(AggregationEngine::new(&self.chart.expense, &expenses).rows())
    }

    pub fn revenue_rows(&self, ctx: &RequestContext) -> Result<Vec<AccountRow<RevenueFigures>>, PortalError> {
        let revenues = self.entries.read_revenues(&ctx.organization_id)?;
        Ok(AggregationEngine::new(&self.chart.revenue, &revenues).rows())
    }

    pub fn entry_warnings(&self, ctx: &RequestContext) -> Result<Vec<EntryWarning>, PortalError> {
        let expenses = self.entries.read_expenses(&ctx.organization_id)?;
        Ok(validate_expenses(&self.chart.expense, &expenses))
    }

    pub fn comparison(&self, ctx: &RequestContext) -> Result<ComparisonReport, PortalError> {
        let entries = self.own_entries(ctx)?;
        Ok(ComparisonReport::compute(
            &self.chart.revenue,
            &entries.revenues,
            &self.chart.expense,
            &entries.expenses,
        ))
    }

    // ------------------------------------------------------------------
    // Consolidated views (CFA only)
    // ------------------------------------------------------------------

    pub fn consolidated_expenses(
        &self,
        ctx: &RequestContext,
        organization_ids: &[OrganizationId],
    ) -> Result<ExpenseMap, PortalError> {
        self.require_cfa(ctx, "consolidated expenses")?;
        let all = self.entries.read_all_expenses()?;
        Ok(ConsolidationEngine::new(&self.chart.expense, &all).consolidate(organization_ids))
    }

    pub fn consolidated_revenues(
        &self,
        ctx: &RequestContext,
        organization_ids: &[OrganizationId],
    ) -> Result<RevenueMap, PortalError> {
        self.require_cfa(ctx, "consolidated revenues")?;
        let all = self.entries.read_all_revenues()?;
        Ok(ConsolidationEngine::new(&self.chart.revenue, &all).consolidate(organization_ids))
    }

    /// Expense grid of the selected organizations added together
    pub fn consolidated_expense_rows(
        &self,
        ctx: &RequestContext,
        organization_ids: &[OrganizationId],
    ) -> Result<Vec<AccountRow<ExpenseFigures>>, PortalError> {
        let merged = self.consolidated_expenses(ctx, organization_ids)?;
        Ok(AggregationEngine::new(&self.chart.expense, &merged).rows())
    }

    pub fn consolidated_comparison(
        &self,
        ctx: &RequestContext,
        organization_ids: &[OrganizationId],
    ) -> Result<ComparisonReport, PortalError> {
        let expenses = self.consolidated_expenses(ctx, organization_ids)?;
        let revenues = self.consolidated_revenues(ctx, organization_ids)?;
        Ok(ComparisonReport::compute(
            &self.chart.revenue,
            &revenues,
            &self.chart.expense,
            &expenses,
        ))
    }

    /// Per-organization expense totals within `scope`, ranked then sampled
    pub fn regional_expense_ranking(
        &self,
        ctx: &RequestContext,
        scope: &Scope,
        sampling: Sampling,
    ) -> Result<Vec<OrganizationTotal<ExpenseFigures>>, PortalError> {
        self.require_cfa(ctx, "regional ranking")?;
        let ids: Vec<OrganizationId> = self.regional_organizations()?.into_iter().map(|o| o.id).collect();
        let all = self.entries.read_all_expenses()?;
        Ok(ConsolidationEngine::new(&self.chart.expense, &all).ranked(&ids, scope, sampling)?)
    }

    pub fn bi_export(&self, ctx: &RequestContext) -> Result<BiExport, PortalError> {
        self.require_cfa(ctx, "BI export")?;
        let organizations = self.regional_organizations()?;
        let all = self.entries.read_all_expenses()?;
        Ok(BiExport {
            headers: bi_headers(&self.chart.expense),
            rows: bi_rows(&self.chart.expense, &organizations, &all),
        })
    }

    // ------------------------------------------------------------------
    // Responsible party
    // ------------------------------------------------------------------

    pub fn responsible(&self, ctx: &RequestContext) -> Result<Option<ResponsibleParty>, PortalError> {
        Ok(self.responsibles.load_responsible(&ctx.organization_id)?)
    }

    /// Saves the form and audits which fields changed
    ///
    /// Saving an identical form writes nothing and is not audited.
    pub fn update_responsible(
        &self,
        ctx: &RequestContext,
        party: ResponsibleParty,
    ) -> Result<Audited<ResponsibleParty>, PortalError> {
        let previous = self.responsible(ctx)?.unwrap_or_default();
        let changed = party.changed_fields(&previous);
        if changed.is_empty() {
            return Ok(Audited::new(party, AuditStatus::NotRequired));
        }

        self.responsibles.save_responsible(&ctx.organization_id, &party)?;
        let audit = self.audit.record(
            ctx,
            AuditAction::ResponsibleUpdate {
                changed_fields: changed.iter().map(|f| f.name().to_string()).collect(),
            },
        );
        Ok(Audited::new(party, audit))
    }

    // ------------------------------------------------------------------
    // Declaration lifecycle
    // ------------------------------------------------------------------

    /// Submits the caller's stored entries with its stored responsible party
    ///
    /// An organization that never saved the form fails validation with
    /// every required field named.
    pub fn submit(&self, ctx: &RequestContext) -> Result<Audited<Declaration>, PortalError> {
        let responsible = self.responsible(ctx)?.unwrap_or_default();
        let entries = self.own_entries(ctx)?;
        Ok(self.lifecycle.submit(ctx, &entries, &responsible)?)
    }

    pub fn cfa_unlock(
        &self,
        ctx: &RequestContext,
        organization_id: &OrganizationId,
    ) -> Result<Audited<Declaration>, PortalError> {
        Ok(self.lifecycle.cfa_unlock(ctx, organization_id)?)
    }

    pub fn self_unlock(&self, ctx: &RequestContext) -> Result<Audited<Declaration>, PortalError> {
        Ok(self.lifecycle.self_unlock(ctx)?)
    }

    pub fn status(&self, ctx: &RequestContext) -> Result<DeclarationState, PortalError> {
        let organization = self.own_organization(ctx)?;
        let entries = self.own_entries(ctx)?;
        Ok(self.lifecycle.status(&organization, &entries)?)
    }

    pub fn declaration_history(&self, ctx: &RequestContext) -> Result<Vec<Declaration>, PortalError> {
        Ok(self.lifecycle.history(&ctx.organization_id)?)
    }

    pub fn overview(&self, ctx: &RequestContext) -> Result<Overview, PortalError> {
        self.require_cfa(ctx, "delivery overview")?;
        let organizations = self.organizations.list_organizations()?;
        Ok(self.lifecycle.overview(&organizations)?)
    }

    // ------------------------------------------------------------------
    // Audit
    // ------------------------------------------------------------------

    /// Appends a non-entry action (login, report generation, ...)
    pub fn record(&self, ctx: &RequestContext, action: AuditAction) -> AuditStatus {
        self.audit.record(ctx, action)
    }

    pub fn audit_history(&self, ctx: &RequestContext) -> Result<Vec<AuditEntry>, PortalError> {
        Ok(self.audit.history_for(&ctx.organization_id)?)
    }

    pub fn account_history(
        &self,
        ctx: &RequestContext,
        chart: Chart,
        account_id: &DottedPath,
    ) -> Result<Vec<AuditEntry>, PortalError> {
        Ok(self.audit.history_for_account(&ctx.organization_id, chart, account_id)?)
    }

    pub fn audit_export(&self, ctx: &RequestContext) -> Result<Vec<AuditExportRow>, PortalError> {
        Ok(self.audit.export_rows(&ctx.organization_id)?)
    }

    /// Restores the caller's expenses to yesterday's end-of-day values
    ///
    /// Corrective audit entries are written first, then every changed
    /// account is saved back to the entry store. Subject to the same gate as
    /// a manual edit.
    pub fn daily_recovery(&self, ctx: &RequestContext) -> Result<RecoveryOutcome, PortalError> {
        self.editor
            .ensure_editable(ctx, self.editor.settings().expense_deadline)?;

        let current = self.entries.read_expenses(&ctx.organization_id)?;
        let outcome = self.audit.daily_recovery(ctx, &current, &self.chart.expense)?;

        for (account_id, figures) in &outcome.restored {
            if current.get(account_id).copied().unwrap_or_default() != *figures {
                self.entries.upsert_expense(&ctx.organization_id, account_id, *figures)?;
            }
        }

        info!(
            organization_id = %ctx.organization_id,
            as_of = %outcome.as_of,
            corrections = outcome.correction_count(),
            "expenses restored"
        );
        Ok(outcome)
    }
}

fn read_chart_file(key: &str, path: Option<&str>) -> Result<String, PortalError> {
    let path = path.ok_or_else(|| PortalError::ChartFile {
        path: key.to_string(),
        reason: "not configured".to_string(),
    })?;
    fs::read_to_string(path).map_err(|e| PortalError::ChartFile {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
