//! People accountable for an organization's figures

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Professional registry of the person who filled in the data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocType {
    #[default]
    #[serde(rename = "CRC")]
    Crc,
    #[serde(rename = "CRA")]
    Cra,
    #[serde(rename = "CPF")]
    Cpf,
    Outro,
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocType::Crc => write!(f, "CRC"),
            DocType::Cra => write!(f, "CRA"),
            DocType::Cpf => write!(f, "CPF"),
            DocType::Outro => write!(f, "Outro"),
        }
    }
}

/// Field of [`ResponsibleParty`], used to report what is missing or changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsibleField {
    UnitResponsibleName,
    UnitResponsibleCraNumber,
    DataResponsibleName,
    DataResponsibleRole,
    DataResponsibleDocType,
    DataResponsibleDocNumber,
    Cnpj,
}

impl ResponsibleField {
    /// Fields that must be filled before a declaration can be submitted
    pub const REQUIRED: [ResponsibleField; 5] = [
        ResponsibleField::UnitResponsibleName,
        ResponsibleField::UnitResponsibleCraNumber,
        ResponsibleField::DataResponsibleName,
        ResponsibleField::DataResponsibleRole,
        ResponsibleField::DataResponsibleDocNumber,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResponsibleField::UnitResponsibleName => "unit_responsible_name",
            ResponsibleField::UnitResponsibleCraNumber => "unit_responsible_cra_number",
            ResponsibleField::DataResponsibleName => "data_responsible_name",
            ResponsibleField::DataResponsibleRole => "data_responsible_role",
            ResponsibleField::DataResponsibleDocType => "data_responsible_doc_type",
            ResponsibleField::DataResponsibleDocNumber => "data_responsible_doc_number",
            ResponsibleField::Cnpj => "cnpj",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            ResponsibleField::UnitResponsibleName,
            ResponsibleField::UnitResponsibleCraNumber,
            ResponsibleField::DataResponsibleName,
            ResponsibleField::DataResponsibleRole,
            ResponsibleField::DataResponsibleDocType,
            ResponsibleField::DataResponsibleDocNumber,
            ResponsibleField::Cnpj,
        ]
        .into_iter()
        .find(|f| f.name() == name)
    }

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            ResponsibleField::UnitResponsibleName => "Nome do responsável pela unidade",
            ResponsibleField::UnitResponsibleCraNumber => "Nº de registro CRA do responsável",
            ResponsibleField::DataResponsibleName => "Nome do responsável pelas informações",
            ResponsibleField::DataResponsibleRole => "Cargo do responsável pelas informações",
            ResponsibleField::DataResponsibleDocType => "Tipo de documento",
            ResponsibleField::DataResponsibleDocNumber => "Nº do documento",
            ResponsibleField::Cnpj => "CNPJ",
        }
    }
}

impl fmt::Display for ResponsibleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Unit head and data filer named on every declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ResponsibleParty {
    #[validate(custom(function = "not_blank"))]
    pub unit_responsible_name: String,
    #[validate(custom(function = "not_blank"))]
    pub unit_responsible_cra_number: String,
    #[validate(custom(function = "not_blank"))]
    pub data_responsible_name: String,
    #[validate(custom(function = "not_blank"))]
    pub data_responsible_role: String,
    #[serde(default)]
    pub data_responsible_doc_type: DocType,
    #[validate(custom(function = "not_blank"))]
    pub data_responsible_doc_number: String,
    #[serde(default)]
    pub cnpj: Option<String>,
}

impl ResponsibleParty {
    /// Required fields left blank, in form order
    pub fn missing_fields(&self) -> Vec<ResponsibleField> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };
        let mut missing: Vec<ResponsibleField> = errors
            .field_errors()
            .keys()
            .filter_map(|name| ResponsibleField::from_name(&name.to_string()))
            .collect();
        missing.sort();
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Fields whose value differs from `other`
    pub fn changed_fields(&self, other: &ResponsibleParty) -> Vec<ResponsibleField> {
        let mut changed = Vec::new();
        if self.unit_responsible_name != other.unit_responsible_name {
            changed.push(ResponsibleField::UnitResponsibleName);
        }
        if self.unit_responsible_cra_number != other.unit_responsible_cra_number {
            changed.push(ResponsibleField::UnitResponsibleCraNumber);
        }
        if self.data_responsible_name != other.data_responsible_name {
            changed.push(ResponsibleField::DataResponsibleName);
        }
        if self.data_responsible_role != other.data_responsible_role {
            changed.push(ResponsibleField::DataResponsibleRole);
        }
        if self.data_responsible_doc_type != other.data_responsible_doc_type {
            changed.push(ResponsibleField::DataResponsibleDocType);
        }
        if self.data_responsible_doc_number != other.data_responsible_doc_number {
            changed.push(ResponsibleField::DataResponsibleDocNumber);
        }
        if self.cnpj != other.cnpj {
            changed.push(ResponsibleField::Cnpj);
        }
        changed
    }
}
