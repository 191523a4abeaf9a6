//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::Money;
use domain_accounts::DottedPath;
use domain_declaration::{DocType, ResponsibleField, ResponsibleParty};
use domain_entries::{Entries, ExpenseFigures, ExpenseMap, RevenueFigures, RevenueMap};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use crate::fixtures::{path, ResponsibleFixtures};

/// Builder for an expense entry map
#[derive(Debug, Default)]
pub struct ExpenseMapBuilder {
    entries: ExpenseMap,
}

impl ExpenseMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one analytical account's total and finalística
    pub fn with(mut self, account_id: &str, total: Decimal, finalistica: Decimal) -> Self {
        self.entries.insert(
            path(account_id),
            ExpenseFigures::new(Money::new(total), Money::new(finalistica)),
        );
        self
    }

    /// Sets an account whose whole total is finalística
    pub fn with_full(self, account_id: &str, total: Decimal) -> Self {
        self.with(account_id, total, total)
    }

    pub fn with_figures(mut self, account_id: DottedPath, figures: ExpenseFigures) -> Self {
        self.entries.insert(account_id, figures);
        self
    }

    pub fn build(self) -> ExpenseMap {
        self.entries
    }
}

/// Builder for a revenue entry map
#[derive(Debug, Default)]
pub struct RevenueMapBuilder {
    entries: RevenueMap,
}

impl RevenueMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, account_id: &str, value: Decimal) -> Self {
        self.entries
            .insert(path(account_id), RevenueFigures::new(Money::new(value)));
        self
    }

    pub fn build(self) -> RevenueMap {
        self.entries
    }
}

/// Both charts' entries at once
pub fn entries(revenues: RevenueMapBuilder, expenses: ExpenseMapBuilder) -> Entries {
    Entries::new(revenues.build(), expenses.build())
}

/// Builder for the responsible-party form, complete by default
#[derive(Debug, Clone)]
pub struct ResponsibleBuilder {
    party: ResponsibleParty,
}

impl Default for ResponsibleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponsibleBuilder {
    /// Starts from the complete fixture form
    pub fn new() -> Self {
        Self {
            party: ResponsibleFixtures::complete(),
        }
    }

    /// Starts from a complete form with generated names
    pub fn random() -> Self {
        let mut builder = Self::new();
        builder.party.unit_responsible_name = Name().fake();
        builder.party.data_responsible_name = Name().fake();
        builder
    }

    /// Leaves one field blank
    pub fn without(mut self, field: ResponsibleField) -> Self {
        match field {
            ResponsibleField::UnitResponsibleName => self.party.unit_responsible_name.clear(),
            ResponsibleField::UnitResponsibleCraNumber => self.party.unit_responsible_cra_number.clear(),
            ResponsibleField::DataResponsibleName => self.party.data_responsible_name.clear(),
            ResponsibleField::DataResponsibleRole => self.party.data_responsible_role.clear(),
            ResponsibleField::DataResponsibleDocType => self.party.data_responsible_doc_type = DocType::default(),
            ResponsibleField::DataResponsibleDocNumber => self.party.data_responsible_doc_number.clear(),
            ResponsibleField::Cnpj => self.party.cnpj = None,
        }
        self
    }

    pub fn with_unit_responsible(mut self, name: impl Into<String>) -> Self {
        self.party.unit_responsible_name = name.into();
        self
    }

    pub fn with_data_responsible_role(mut self, role: impl Into<String>) -> Self {
        self.party.data_responsible_role = role.into();
        self
    }

    pub fn with_document(mut self, doc_type: DocType, number: impl Into<String>) -> Self {
        self.party.data_responsible_doc_type = doc_type;
        self.party.data_responsible_doc_number = number.into();
        self
    }

    pub fn build(self) -> ResponsibleParty {
        self.party
    }
}
