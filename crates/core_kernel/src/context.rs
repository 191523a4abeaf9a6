//! Identity of the caller, passed explicitly into every core operation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::{OrganizationId, UserId};

/// Kind of organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrganizationType {
    /// The federal council; exempt from deadlines, reads every organization
    Cfa,
    /// A regional council
    Cra,
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganizationType::Cfa => write!(f, "CFA"),
            OrganizationType::Cra => write!(f, "CRA"),
        }
    }
}

/// Session identity supplied by the (excluded) authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    pub user_name: String,
    pub organization_type: OrganizationType,
}

impl RequestContext {
    pub fn new(
        organization_id: impl Into<OrganizationId>,
        user_id: UserId,
        user_name: impl Into<String>,
        organization_type: OrganizationType,
    ) -> Self {
        Self {
            organization_id: organization_id.into(),
            user_id,
            user_name: user_name.into(),
            organization_type,
        }
    }

    pub fn is_cfa(&self) -> bool {
        self.organization_type == OrganizationType::Cfa
    }

    /// True if this caller owns the given organization's data
    pub fn owns(&self, organization_id: &OrganizationId) -> bool {
        &self.organization_id == organization_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cfa_context() {
        let ctx = RequestContext::new("cfa", UserId::new(), "Ana", OrganizationType::Cfa);
        assert!(ctx.is_cfa());
        assert!(ctx.owns(&OrganizationId::from("cfa")));
        assert!(!ctx.owns(&OrganizationId::from("cra-sp")));
    }

    #[test]
    fn test_organization_type_serde() {
        assert_eq!(serde_json::to_string(&OrganizationType::Cra).unwrap(), "\"CRA\"");
    }
}
