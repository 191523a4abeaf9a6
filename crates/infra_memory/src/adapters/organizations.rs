//! Organization directory

use core_kernel::{DomainPort, PortError};
use domain_entries::{Organization, OrganizationDirectory};

use crate::table::Table;

#[derive(Debug)]
pub struct MemoryOrganizationDirectory {
    organizations: Table<Vec<Organization>>,
}

impl MemoryOrganizationDirectory {
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self {
            organizations: Table::new("organizations", organizations),
        }
    }

    pub fn register(&self, organization: Organization) -> Result<(), PortError> {
        let mut organizations = self.organizations.write()?;
        organizations.retain(|o| o.id != organization.id);
        organizations.push(organization);
        Ok(())
    }
}

impl DomainPort for MemoryOrganizationDirectory {}

impl OrganizationDirectory for MemoryOrganizationDirectory {
    fn list_organizations(&self) -> Result<Vec<Organization>, PortError> {
        let mut organizations = self.organizations.read()?.clone();
        organizations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(organizations)
    }
}
