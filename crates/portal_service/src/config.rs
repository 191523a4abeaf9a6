//! Portal configuration
//!
//! Values come from `PORTAL_*` environment variables (a `.env` file is read
//! first when present) and fall back to the defaults below. Deadline literals
//! are local wall-clock times in the configured timezone.

use core_kernel::{CoreError, Deadline, Timezone};
use domain_accounts::DottedPath;
use domain_declaration::{EditorSettings, DEFAULT_FULL_FINALISTICA_ACCOUNTS};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

const ENV_PREFIX: &str = "PORTAL";

/// Portal configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Declaration and expense-entry deadline, local time
    pub declaration_deadline: String,
    /// Revenue-entry deadline, local time
    pub revenue_deadline: String,
    /// IANA name of the timezone the deadlines are published in
    pub timezone: String,
    /// Accounts whose finalística is always their total; comma-separated in the environment
    #[serde(deserialize_with = "comma_separated")]
    pub full_finalistica_accounts: Vec<String>,
    /// Chart of revenue accounts (JSON list)
    pub revenue_chart_path: Option<String>,
    /// Chart of expense accounts (JSON list)
    pub expense_chart_path: Option<String>,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            declaration_deadline: "2026-03-31T23:59:59".to_string(),
            revenue_deadline: "2026-03-15T23:59:59".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            full_finalistica_accounts: DEFAULT_FULL_FINALISTICA_ACCOUNTS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            revenue_chart_path: None,
            expense_chart_path: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl PortalConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::load(Self::environment())
    }

    /// Loads configuration from explicit `PORTAL_*` variables instead of the process environment
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::load(Self::environment().source(Some(vars)))
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
    }

    fn load(source: config::Environment) -> Result<Self, CoreError> {
        config::Config::builder()
            .add_source(source)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))
    }

    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        self.timezone
            .parse()
            .map_err(|e| CoreError::configuration(format!("timezone: {e}")))
    }

    pub fn declaration_deadline(&self) -> Result<Deadline, CoreError> {
        self.deadline("declaration_deadline", &self.declaration_deadline)
    }

    pub fn revenue_deadline(&self) -> Result<Deadline, CoreError> {
        self.deadline("revenue_deadline", &self.revenue_deadline)
    }

    fn deadline(&self, key: &str, value: &str) -> Result<Deadline, CoreError> {
        Deadline::parse_local(value, self.timezone()?).map_err(|e| CoreError::configuration(format!("{key}: {e}")))
    }

    pub fn full_finalistica_accounts(&self) -> Result<BTreeSet<DottedPath>, CoreError> {
        self.full_finalistica_accounts
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<DottedPath>()
                    .map_err(|e| CoreError::configuration(format!("full_finalistica_accounts: {e}")))
            })
            .collect()
    }

    pub fn editor_settings(&self) -> Result<EditorSettings, CoreError> {
        Ok(EditorSettings {
            expense_deadline: self.declaration_deadline()?,
            revenue_deadline: self.revenue_deadline()?,
            full_finalistica_accounts: self.full_finalistica_accounts()?,
        })
    }
}

// Environment values stay strings so ids such as `1.10` are never read as numbers
fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Accounts {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Accounts::deserialize(deserializer)? {
        Accounts::List(ids) => ids,
        Accounts::Joined(joined) => joined
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
    })
}
