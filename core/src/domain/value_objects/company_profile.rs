//! Company projection returned by the company service.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Company, CompanyCategory};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyProfile {
    pub company_name: String,
    pub company_description: String,
    pub category: CompanyCategory,
}

impl From<&Company> for CompanyProfile {
    fn from(company: &Company) -> Self {
        Self {
            company_name: company.name.clone(),
            company_description: company.description.clone(),
            category: company.category,
        }
    }
}
