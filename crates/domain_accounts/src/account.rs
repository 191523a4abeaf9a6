//! Account definitions as published in the chart of accounts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccountError;
use crate::path::DottedPath;

/// Whether an account holds entered figures or derives them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Non-leaf; value is always the sum of its analytical descendants
    #[serde(rename = "Sintética", alias = "SYNTHETIC")]
    Synthetic,
    /// Leaf; the only kind that receives entries
    #[serde(rename = "Analítica", alias = "ANALYTICAL")]
    Analytical,
}

impl AccountKind {
    pub fn is_analytical(&self) -> bool {
        matches!(self, AccountKind::Analytical)
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, AccountKind::Synthetic)
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Synthetic => write!(f, "Sintética"),
            AccountKind::Analytical => write!(f, "Analítica"),
        }
    }
}

impl FromStr for AccountKind {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Sintética" | "SYNTHETIC" => Ok(AccountKind::Synthetic),
            "Analítica" | "ANALYTICAL" => Ok(AccountKind::Analytical),
            other => Err(AccountError::UnknownKind(other.to_string())),
        }
    }
}

/// A node of the chart of accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: DottedPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    pub group: String,
    pub subgroup: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
}

impl Account {
    pub fn new(
        id: DottedPath,
        name: impl Into<String>,
        group: impl Into<String>,
        subgroup: impl Into<String>,
        kind: AccountKind,
    ) -> Self {
        Self {
            id,
            code: None,
            name: name.into(),
            group: group.into(),
            subgroup: subgroup.into(),
            kind,
        }
    }

    pub fn is_analytical(&self) -> bool {
        self.kind.is_analytical()
    }

    pub fn is_synthetic(&self) -> bool {
        self.kind.is_synthetic()
    }

    /// Name normalised for duplicate-name comparisons
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_accepts_both_spellings() {
        let a: AccountKind = serde_json::from_str("\"Analítica\"").unwrap();
        let b: AccountKind = serde_json::from_str("\"ANALYTICAL\"").unwrap();
        assert_eq!(a, b);
        assert_eq!("SYNTHETIC".parse::<AccountKind>().unwrap(), AccountKind::Synthetic);
        assert!("Leaf".parse::<AccountKind>().is_err());
    }

    #[test]
    fn test_account_from_chart_json() {
        let json = r#"{"id":"1.1.1.1","name":"Salários","group":"Pessoal","subgroup":"Remuneração","type":"Analítica"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id.to_string(), "1.1.1.1");
        assert!(account.is_analytical());
        assert_eq!(account.code, None);
    }

    #[test]
    fn test_normalized_name() {
        let account = Account::new(
            "1.1".parse().unwrap(),
            "  Encargos Sociais ",
            "Pessoal",
            "",
            AccountKind::Synthetic,
        );
        assert_eq!(account.normalized_name(), "encargos sociais");
    }
}
