//! MySQL implementation of the CompanyRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

use ed_core::domain::entities::{Company, CompanyCategory, CompanyDetails};
use ed_core::errors::DomainError;
use ed_core::repositories::CompanyRepository;

use super::{column_error, storage_error};
use crate::database::transaction::MySqlTx;

/// MySQL implementation of CompanyRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlCompanyRepository;

impl MySqlCompanyRepository {
    pub fn new() -> Self {
        Self
    }

    fn row_to_company(row: &MySqlRow) -> Result<Company, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let category: String = row
            .try_get("category")
            .map_err(|e| column_error("category", e))?;

        Ok(Company {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            description: row
                .try_get("description")
                .map_err(|e| column_error("description", e))?,
            category: category
                .parse::<CompanyCategory>()
                .map_err(|e| column_error("category", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl CompanyRepository<MySqlTx> for MySqlCompanyRepository {
    async fn create(&self, tx: &mut MySqlTx, details: CompanyDetails) -> Result<Company, DomainError> {
        let company = Company::from_new(Uuid::new_v4(), details, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO companies (id, name, description, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(company.id.to_string())
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.category.as_str())
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(tx.conn())
        .await
        .map_err(|e| storage_error("Failed to create company", e))?;

        Ok(company)
    }

    async fn update(&self, tx: &mut MySqlTx, company: Company) -> Result<Company, DomainError> {
        sqlx::query(
            r#"
            UPDATE companies
            SET name = ?, description = ?, category = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.category.as_str())
        .bind(company.updated_at)
        .bind(company.id.to_string())
        .execute(tx.conn())
        .await
        .map_err(|e| storage_error("Failed to update company", e))?;

        Ok(company)
    }

    async fn find_by_id(&self, tx: &mut MySqlTx, id: Uuid) -> Result<Option<Company>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, category, created_at, updated_at
            FROM companies
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| storage_error("Failed to find company", e))?;

        row.as_ref().map(Self::row_to_company).transpose()
    }
}
