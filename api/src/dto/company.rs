use ed_core::domain::entities::{CompanyCategory, CompanyDetails};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyRequest {
    #[validate(length(min = 1, max = 50))]
    pub company_name: String,
    #[validate(length(min = 1, max = 50))]
    pub company_description: String,
    pub category: CompanyCategory,
}

impl From<CompanyRequest> for CompanyDetails {
    fn from(req: CompanyRequest) -> Self {
        CompanyDetails {
            name: req.company_name,
            description: req.company_description,
            category: req.category,
        }
    }
}
