//! Audit entries and the typed action payloads they carry

use chrono::{DateTime, Utc};
use core_kernel::{AuditEntryId, DeclarationId, Money, OrganizationId, RequestContext, UserId};
use domain_accounts::{Chart, DottedPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which figure a field edit touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditField {
    /// Expense total
    Total,
    /// Expense finalística share
    Finalistica,
    /// Revenue value
    Value,
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditField::Total => write!(f, "Total"),
            AuditField::Finalistica => write!(f, "Atividade Finalística"),
            AuditField::Value => write!(f, "Valor"),
        }
    }
}

/// What happened, with a fixed field set per action type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type", content = "details", rename_all = "snake_case")]
pub enum AuditAction {
    FieldEdit {
        chart: Chart,
        account_id: DottedPath,
        account_name: String,
        field: AuditField,
        previous_value: Money,
        new_value: Money,
        #[serde(default)]
        is_recovery: bool,
    },
    ResponsibleUpdate {
        changed_fields: Vec<String>,
    },
    DeclarationSubmitted {
        declaration_id: DeclarationId,
        receipt_number: String,
    },
    DeclarationRectified {
        declaration_id: DeclarationId,
        receipt_number: String,
        rectification_count: u32,
    },
    RectificationUnlockedByCfa {
        declaration_id: DeclarationId,
        receipt_number: String,
        unlocked_by: OrganizationId,
    },
    RectificationUnlockedByUser {
        declaration_id: DeclarationId,
        receipt_number: String,
    },
    ReportGenerated {
        report: String,
    },
    PdfGenerated {
        document: String,
    },
    Login,
    Logout,
    /// Long-tail action types without a dedicated variant
    Other {
        label: String,
        #[serde(default)]
        details: BTreeMap<String, serde_json::Value>,
    },
}

impl AuditAction {
    /// Stable snake_case name of the action type
    pub fn action_type(&self) -> &'static str {
        match self {
            AuditAction::FieldEdit { .. } => "field_edit",
            AuditAction::ResponsibleUpdate { .. } => "responsible_update",
            AuditAction::DeclarationSubmitted { .. } => "declaration_submitted",
            AuditAction::DeclarationRectified { .. } => "declaration_rectified",
            AuditAction::RectificationUnlockedByCfa { .. } => "rectification_unlocked_by_cfa",
            AuditAction::RectificationUnlockedByUser { .. } => "rectification_unlocked_by_user",
            AuditAction::ReportGenerated { .. } => "report_generated",
            AuditAction::PdfGenerated { .. } => "pdf_generated",
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::Other { .. } => "other",
        }
    }

    /// Account touched by this action, if any
    pub fn account_id(&self) -> Option<&DottedPath> {
        self.account().map(|(_, id)| id)
    }

    /// Chart and account touched by this action, if any
    pub fn account(&self) -> Option<(Chart, &DottedPath)> {
        match self {
            AuditAction::FieldEdit { chart, account_id, .. } => Some((*chart, account_id)),
            _ => None,
        }
    }

    pub fn is_recovery(&self) -> bool {
        matches!(self, AuditAction::FieldEdit { is_recovery: true, .. })
    }
}

/// One row of the append-only audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
}

impl AuditEntry {
    /// Entry for `ctx`'s user, filed under `organization_id`
    pub fn new(
        ctx: &RequestContext,
        organization_id: OrganizationId,
        timestamp: DateTime<Utc>,
        action: AuditAction,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            organization_id,
            user_id: ctx.user_id,
            user_name: ctx.user_name.clone(),
            timestamp,
            action,
        }
    }
}
