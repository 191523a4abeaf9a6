//! The declaration record
//!
//! One row per submission event. Apart from the `status` flag, which an
//! unlock flips from `Submitted` to `Draft`, a declaration never changes after
//! it is created: its snapshot is the authoritative copy of the figures as
//! delivered, independent of later edits to live entries.

use chrono::{DateTime, Utc};
use core_kernel::{DeclarationId, Money, OrganizationId};
use domain_entries::Entries;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DeclarationError;
use crate::receipt::ReceiptNumber;
use crate::responsible::ResponsibleParty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationStatus {
    Submitted,
    /// Unlocked for rectification; a new submission is expected
    Draft,
}

impl fmt::Display for DeclarationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationStatus::Submitted => write!(f, "submitted"),
            DeclarationStatus::Draft => write!(f, "draft"),
        }
    }
}

/// Grand totals frozen at submission time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationTotals {
    pub revenue: Money,
    pub expense: Money,
    pub finalistica: Money,
    pub apoio: Money,
}

/// Everything a new declaration is built from
#[derive(Debug, Clone)]
pub struct NewDeclaration {
    pub organization_id: OrganizationId,
    pub receipt_number: ReceiptNumber,
    pub delivery_date: DateTime<Utc>,
    pub rectification_count: u32,
    pub is_rectification: bool,
    pub totals: DeclarationTotals,
    pub snapshot: Entries,
    pub responsible: ResponsibleParty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    id: DeclarationId,
    organization_id: OrganizationId,
    receipt_number: ReceiptNumber,
    delivery_date: DateTime<Utc>,
    is_rectification: bool,
    rectification_count: u32,
    totals: DeclarationTotals,
    snapshot: Entries,
    responsible_snapshot: ResponsibleParty,
    status: DeclarationStatus,
}

impl Declaration {
    /// A freshly submitted declaration
    pub fn submitted(new: NewDeclaration) -> Self {
        Self {
            id: DeclarationId::new(),
            organization_id: new.organization_id,
            receipt_number: new.receipt_number,
            delivery_date: new.delivery_date,
            is_rectification: new.is_rectification,
            rectification_count: new.rectification_count,
            totals: new.totals,
            snapshot: new.snapshot,
            responsible_snapshot: new.responsible,
            status: DeclarationStatus::Submitted,
        }
    }

    pub fn id(&self) -> DeclarationId {
        self.id
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    pub fn receipt_number(&self) -> &ReceiptNumber {
        &self.receipt_number
    }

    pub fn delivery_date(&self) -> DateTime<Utc> {
        self.delivery_date
    }

    pub fn is_rectification(&self) -> bool {
        self.is_rectification
    }

    pub fn rectification_count(&self) -> u32 {
        self.rectification_count
    }

    pub fn totals(&self) -> &DeclarationTotals {
        &self.totals
    }

    pub fn snapshot(&self) -> &Entries {
        &self.snapshot
    }

    pub fn responsible_snapshot(&self) -> &ResponsibleParty {
        &self.responsible_snapshot
    }

    pub fn status(&self) -> DeclarationStatus {
        self.status
    }

    pub fn is_submitted(&self) -> bool {
        self.status == DeclarationStatus::Submitted
    }

    pub fn is_draft(&self) -> bool {
        self.status == DeclarationStatus::Draft
    }

    /// Applies a status change; only `Submitted -> Draft` is allowed
    pub fn set_status(&mut self, status: DeclarationStatus) -> Result<(), DeclarationError> {
        match (self.status, status) {
            (DeclarationStatus::Submitted, DeclarationStatus::Draft) => {
                self.status = status;
                Ok(())
            }
            (from, to) if from == to => Ok(()),
            (from, to) => Err(DeclarationError::InvalidStateTransition { from, to }),
        }
    }
}
