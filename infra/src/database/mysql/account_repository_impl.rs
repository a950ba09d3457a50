//! MySQL implementation of the AccountRepository trait.
//!
//! Accounts live in the `users` table. The unique index on `email` backs up
//! the service-level duplicate check; a violation on insert is reported as
//! `AuthError::DuplicateAccount`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

use ed_core::domain::entities::{Account, FederatedIdentity, NewAccount, OtpChallenge, Role};
use ed_core::errors::{AuthError, DomainError};
use ed_core::repositories::AccountRepository;

use super::{column_error, storage_error};
use crate::database::transaction::MySqlTx;

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, password_hash, first_name, last_name, role,
           sso_provider, sso_provider_id, otp_code, otp_issued_at, otp_expires_at,
           registration_step, trial_active, trial_start_date, company_id,
           created_at, updated_at
    FROM users
"#;

/// MySQL implementation of AccountRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlAccountRepository;

impl MySqlAccountRepository {
    pub fn new() -> Self {
        Self
    }

    /// Convert a `users` row to an Account entity
    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let role: String = row.try_get("role").map_err(|e| column_error("role", e))?;
        let company_id: Option<String> = row
            .try_get("company_id")
            .map_err(|e| column_error("company_id", e))?;

        let sso_provider: Option<String> = row
            .try_get("sso_provider")
            .map_err(|e| column_error("sso_provider", e))?;
        let sso_provider_id: Option<String> = row
            .try_get("sso_provider_id")
            .map_err(|e| column_error("sso_provider_id", e))?;

        let otp_code: Option<String> = row
            .try_get("otp_code")
            .map_err(|e| column_error("otp_code", e))?;
        let otp_issued_at: Option<DateTime<Utc>> = row
            .try_get("otp_issued_at")
            .map_err(|e| column_error("otp_issued_at", e))?;
        let otp_expires_at: Option<DateTime<Utc>> = row
            .try_get("otp_expires_at")
            .map_err(|e| column_error("otp_expires_at", e))?;

        let otp = match (otp_code, otp_expires_at) {
            (Some(code), Some(expires_at)) => Some(OtpChallenge {
                code,
                issued_at: otp_issued_at.unwrap_or(expires_at),
                expires_at,
            }),
            _ => None,
        };

        let federated = match (sso_provider, sso_provider_id) {
            (Some(provider), Some(provider_id)) => Some(FederatedIdentity {
                provider,
                provider_id,
            }),
            _ => None,
        };

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| column_error("first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| column_error("last_name", e))?,
            role: role.parse::<Role>().map_err(|e| column_error("role", e))?,
            federated,
            otp,
            registration_step: row
                .try_get("registration_step")
                .map_err(|e| column_error("registration_step", e))?,
            trial_active: row
                .try_get("trial_active")
                .map_err(|e| column_error("trial_active", e))?,
            trial_start_date: row
                .try_get::<Option<NaiveDate>, _>("trial_start_date")
                .map_err(|e| column_error("trial_start_date", e))?,
            company_id: company_id
                .map(|value| Uuid::parse_str(&value))
                .transpose()
                .map_err(|e| column_error("company_id", e))?,
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
impl AccountRepository<MySqlTx> for MySqlAccountRepository {
    async fn find_by_email(&self, tx: &mut MySqlTx, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(tx.conn())
            .await
            .map_err(|e| storage_error("Failed to find account by email", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create(&self, tx: &mut MySqlTx, account: NewAccount) -> Result<Account, DomainError> {
        let account = Account::from_new(Uuid::new_v4(), account, Utc::now());

        let query = r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name, role,
                sso_provider, sso_provider_id, otp_code, otp_issued_at, otp_expires_at,
                registration_step, trial_active, trial_start_date, company_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.role.as_str())
            .bind(account.federated.as_ref().map(|f| f.provider.as_str()))
            .bind(account.federated.as_ref().map(|f| f.provider_id.as_str()))
            .bind(account.otp.as_ref().map(|otp| otp.code.as_str()))
            .bind(account.otp.as_ref().map(|otp| otp.issued_at))
            .bind(account.otp.as_ref().map(|otp| otp.expires_at))
            .bind(account.registration_step)
            .bind(account.trial_active)
            .bind(account.trial_start_date)
            .bind(account.company_id.map(|id| id.to_string()))
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(tx.conn())
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db) = &e {
                    if db.is_unique_violation() {
                        return DomainError::Auth(AuthError::DuplicateAccount);
                    }
                }
                storage_error("Failed to create account", e)
            })?;

        Ok(account)
    }

    async fn update(&self, tx: &mut MySqlTx, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE users SET
                password_hash = ?, first_name = ?, last_name = ?, role = ?,
                sso_provider = ?, sso_provider_id = ?,
                otp_code = ?, otp_issued_at = ?, otp_expires_at = ?,
                registration_step = ?, trial_active = ?, trial_start_date = ?,
                company_id = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.password_hash)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.role.as_str())
            .bind(account.federated.as_ref().map(|f| f.provider.as_str()))
            .bind(account.federated.as_ref().map(|f| f.provider_id.as_str()))
            .bind(account.otp.as_ref().map(|otp| otp.code.as_str()))
            .bind(account.otp.as_ref().map(|otp| otp.issued_at))
            .bind(account.otp.as_ref().map(|otp| otp.expires_at))
            .bind(account.registration_step)
            .bind(account.trial_active)
            .bind(account.trial_start_date)
            .bind(account.company_id.map(|id| id.to_string()))
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .execute(tx.conn())
            .await
            .map_err(|e| storage_error("Failed to update account", e))?;

        if result.rows_affected() == 0 {
            // MySQL reports 0 for an unchanged row too, so confirm it exists
            let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
                .bind(account.id.to_string())
                .fetch_optional(tx.conn())
                .await
                .map_err(|e| storage_error("Failed to check account", e))?;
            if exists.is_none() {
                return Err(DomainError::storage(format!(
                    "account {} does not exist",
                    account.id
                )));
            }
        }

        Ok(account)
    }
}
