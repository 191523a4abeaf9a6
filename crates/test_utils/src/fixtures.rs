//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data shared across the portal crates. The
//! sample chart is small but exercises every tree feature the engines care
//! about: nested synthetics, a collapsed synthetic, a full-finalística
//! account, and both economic categories.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{FixedClock, Money, OrganizationId, OrganizationType, RequestContext, UserId};
use domain_accounts::{ChartOfAccounts, DottedPath};
use domain_declaration::{DocType, ResponsibleParty};
use domain_entries::Organization;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Expense chart in the static list format
pub const EXPENSE_CHART_JSON: &str = r#"[
    {"id": "1", "name": "Despesas Correntes", "type": "Sintética", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1", "name": "Pessoal e Encargos", "type": "Sintética", "group": "Pessoal", "subgroup": ""},
    {"id": "1.1.1", "name": "Remuneração", "type": "Sintética", "group": "Pessoal", "subgroup": "Remuneração"},
    {"id": "1.1.1.1", "name": "Salários", "type": "Analítica", "group": "Pessoal", "subgroup": "Remuneração"},
    {"id": "1.1.1.2", "name": "Férias", "type": "Analítica", "group": "Pessoal", "subgroup": "Remuneração"},
    {"id": "1.5", "name": "Transferências", "type": "Sintética", "group": "Transferências", "subgroup": ""},
    {"id": "1.5.1", "name": "Transferências ao CFA", "type": "Sintética", "group": "Transferências", "subgroup": ""},
    {"id": "1.5.1.1", "name": "Cota-parte CFA", "type": "Analítica", "group": "Transferências", "subgroup": ""},
    {"id": "1.7", "name": "Serviços de Terceiros", "type": "Sintética", "group": "Serviços", "subgroup": ""},
    {"id": "1.7.1", "name": "Consultoria", "type": "Sintética", "group": "Serviços", "subgroup": ""},
    {"id": "1.7.1.1", "name": "Consultoria", "type": "Analítica", "group": "Serviços", "subgroup": ""},
    {"id": "2", "name": "Despesas de Capital", "type": "Sintética", "group": "Investimentos", "subgroup": ""},
    {"id": "2.1", "name": "Investimentos", "type": "Sintética", "group": "Investimentos", "subgroup": ""},
    {"id": "2.1.1", "name": "Equipamentos", "type": "Analítica", "group": "Investimentos", "subgroup": ""},
    {"id": "2.1.2", "name": "Veículos", "type": "Analítica", "group": "Investimentos", "subgroup": ""}
]"#;

/// Revenue chart in the static list format
pub const REVENUE_CHART_JSON: &str = r#"[
    {"id": "1", "name": "Receitas Correntes", "type": "SYNTHETIC", "group": "Receitas", "subgroup": ""},
    {"id": "1.1", "name": "Anuidades", "type": "SYNTHETIC", "group": "Receitas", "subgroup": ""},
    {"id": "1.1.1", "name": "Anuidades Pessoa Física", "type": "ANALYTICAL", "group": "Receitas", "subgroup": ""},
    {"id": "1.1.2", "name": "Anuidades Pessoa Jurídica", "type": "ANALYTICAL", "group": "Receitas", "subgroup": ""},
    {"id": "1.2", "name": "Taxas", "type": "ANALYTICAL", "group": "Receitas", "subgroup": ""},
    {"id": "2", "name": "Receitas de Capital", "type": "SYNTHETIC", "group": "Capital", "subgroup": ""},
    {"id": "2.1", "name": "Alienação de Bens", "type": "ANALYTICAL", "group": "Capital", "subgroup": ""}
]"#;

static SAMPLE_CHART: Lazy<ChartOfAccounts> = Lazy::new(|| {
    ChartOfAccounts::from_json(REVENUE_CHART_JSON, EXPENSE_CHART_JSON).expect("sample chart is valid")
});

/// Fixture for chart-of-accounts test data
pub struct ChartFixtures;

impl ChartFixtures {
    /// The sample revenue and expense charts
    pub fn sample() -> ChartOfAccounts {
        SAMPLE_CHART.clone()
    }

    pub fn sample_arc() -> Arc<ChartOfAccounts> {
        Arc::new(Self::sample())
    }

    /// Analytical expense account ids of the sample chart, in chart order
    pub fn expense_leaves() -> Vec<DottedPath> {
        SAMPLE_CHART
            .expense
            .in_chart_order()
            .filter(|a| a.is_analytical())
            .map(|a| a.id.clone())
            .collect()
    }

    /// Analytical revenue account ids of the sample chart, in chart order
    pub fn revenue_leaves() -> Vec<DottedPath> {
        SAMPLE_CHART
            .revenue
            .in_chart_order()
            .filter(|a| a.is_analytical())
            .map(|a| a.id.clone())
            .collect()
    }
}

/// Parses a dotted path literal
pub fn path(id: &str) -> DottedPath {
    id.parse().expect("valid dotted path")
}

/// Fixture for the organizations taking part in a cycle
pub struct OrganizationFixtures;

impl OrganizationFixtures {
    pub fn cfa() -> Organization {
        Organization::new("cfa", "Conselho Federal de Administração", OrganizationType::Cfa)
    }

    pub fn cra_sp() -> Organization {
        Organization::new("cra-sp", "CRA São Paulo", OrganizationType::Cra)
    }

    pub fn cra_rj() -> Organization {
        Organization::new("cra-rj", "CRA Rio de Janeiro", OrganizationType::Cra)
    }

    pub fn cra_mg() -> Organization {
        Organization::new("cra-mg", "CRA Minas Gerais", OrganizationType::Cra)
    }

    /// The federal council and three regional councils
    pub fn all() -> Vec<Organization> {
        vec![Self::cfa(), Self::cra_sp(), Self::cra_rj(), Self::cra_mg()]
    }

    pub fn regional_ids() -> Vec<OrganizationId> {
        vec!["cra-sp".into(), "cra-rj".into(), "cra-mg".into()]
    }
}

/// Fixture for request contexts
pub struct ContextFixtures;

impl ContextFixtures {
    pub fn for_organization(organization: &Organization, user_name: &str) -> RequestContext {
        RequestContext::new(
            organization.id.clone(),
            UserId::new(),
            user_name,
            organization.organization_type,
        )
    }

    pub fn cfa() -> RequestContext {
        Self::for_organization(&OrganizationFixtures::cfa(), "Carlos Andrade")
    }

    pub fn cra_sp() -> RequestContext {
        Self::for_organization(&OrganizationFixtures::cra_sp(), "Ana Souza")
    }

    pub fn cra_rj() -> RequestContext {
        Self::for_organization(&OrganizationFixtures::cra_rj(), "Bruno Lima")
    }

    pub fn cra_mg() -> RequestContext {
        Self::for_organization(&OrganizationFixtures::cra_mg(), "Marina Costa")
    }
}

/// Fixture for instants around the default 2026 deadlines
///
/// The default declaration deadline is 2026-03-31 23:59:59 in São Paulo,
/// which is 2026-04-01 02:59:59 UTC.
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Early in the cycle, before both deadlines
    pub fn before_deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 13, 0, 0).unwrap()
    }

    /// After the revenue deadline, before the declaration deadline
    pub fn between_deadlines() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, 13, 0, 0).unwrap()
    }

    /// The last second the declaration deadline is still open
    pub fn at_deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 2, 59, 59).unwrap()
    }

    /// Past the declaration deadline
    pub fn after_deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 5, 12, 0, 0).unwrap()
    }

    pub fn clock_before_deadline() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Self::before_deadline()))
    }
}

/// Fixture for responsible-party data
pub struct ResponsibleFixtures;

impl ResponsibleFixtures {
    /// A form with every field filled
    pub fn complete() -> ResponsibleParty {
        ResponsibleParty {
            unit_responsible_name: "João Pereira".to_string(),
            unit_responsible_cra_number: "CRA-SP 012345".to_string(),
            data_responsible_name: "Ana Souza".to_string(),
            data_responsible_role: "Contadora".to_string(),
            data_responsible_doc_type: DocType::Crc,
            data_responsible_doc_number: "1SP123456".to_string(),
            cnpj: Some("62.529.568/0001-09".to_string()),
        }
    }
}

/// Fixture for money amounts used in the scenario tests
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn salaries_total() -> Money {
        Money::new(dec!(100))
    }

    pub fn salaries_finalistica() -> Money {
        Money::new(dec!(60))
    }

    pub fn vacation_total() -> Money {
        Money::new(dec!(50))
    }
}
