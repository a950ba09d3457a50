//! Company entity owned by an onboarding account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business size bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyCategory {
    Micro,
    Small,
    Middle,
    Enterprise,
}

impl CompanyCategory {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyCategory::Micro => "MICRO",
            CompanyCategory::Small => "SMALL",
            CompanyCategory::Middle => "MIDDLE",
            CompanyCategory::Enterprise => "ENTERPRISE",
        }
    }
}

impl std::str::FromStr for CompanyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MICRO" => Ok(CompanyCategory::Micro),
            "SMALL" => Ok(CompanyCategory::Small),
            "MIDDLE" => Ok(CompanyCategory::Middle),
            "ENTERPRISE" => Ok(CompanyCategory::Enterprise),
            _ => Err(format!("Invalid company category: {}", s)),
        }
    }
}

/// Company entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: CompanyCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Materializes a new company with the identifier chosen by the store
    pub fn from_new(id: Uuid, new: CompanyDetails, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            category: new.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the descriptive fields
    pub fn apply(&mut self, details: CompanyDetails) {
        self.name = details.name;
        self.description = details.description;
        self.category = details.category;
        self.updated_at = Utc::now();
    }
}

/// Descriptive company fields, used both to create and to update a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub name: String,
    pub description: String,
    pub category: CompanyCategory,
}
