//! Organizations known to the portal

use core_kernel::{OrganizationId, OrganizationType};
use serde::{Deserialize, Serialize};

/// A council taking part in the declaration cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    #[serde(rename = "type")]
    pub organization_type: OrganizationType,
}

impl Organization {
    pub fn new(id: impl Into<OrganizationId>, name: impl Into<String>, organization_type: OrganizationType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            organization_type,
        }
    }

    pub fn is_cfa(&self) -> bool {
        self.organization_type == OrganizationType::Cfa
    }
}
