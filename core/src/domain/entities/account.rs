//! Account entity representing a registered dashboard user.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authorization role carried by an account and its session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Owner of a company dashboard
    Admin,
    /// Regular member
    User,
}

impl Role {
    /// Every role a token may be issued for
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Identity vouched for by an external provider
///
/// Provider name and provider-issued id only exist as a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    pub provider: String,
    pub provider_id: String,
}

impl FederatedIdentity {
    pub fn new(provider: impl Into<String>, provider_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            provider_id: provider_id.into(),
        }
    }
}

/// A one-time passcode attached to an account
///
/// Code and expiry live in one value so they are always set or cleared together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Fixed-length numeric code
    pub code: String,

    /// When the code was generated
    pub issued_at: DateTime<Utc>,

    /// Last instant at which the code is accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Creates a challenge valid for `validity` from `issued_at`
    pub fn new(code: String, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            code,
            issued_at,
            expires_at: issued_at + validity,
        }
    }

    /// Whether the challenge has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares a submitted code in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        if self.code.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }
}

impl std::fmt::Debug for OtpChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpChallenge")
            .field("code", &"******")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Account entity, identified by its unique email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Identifier assigned by the store on creation
    pub id: Uuid,

    /// Unique, case-sensitive as stored
    pub email: String,

    /// bcrypt digest; absent for federated accounts
    pub password_hash: Option<String>,

    pub first_name: String,

    pub last_name: String,

    pub role: Role,

    /// External identity provider, if registered through one
    pub federated: Option<FederatedIdentity>,

    /// Current OTP challenge, if any
    pub otp: Option<OtpChallenge>,

    /// Onboarding progress counter
    pub registration_step: i8,

    /// Whether a trial is running
    pub trial_active: bool,

    pub trial_start_date: Option<NaiveDate>,

    /// Owning company
    pub company_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Materializes a new account with the identifier chosen by the store
    pub fn from_new(id: Uuid, new: NewAccount, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: new.email,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            role: new.role,
            federated: new.federated,
            otp: new.otp,
            registration_step: 0,
            trial_active: false,
            trial_start_date: None,
            company_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces any current challenge
    pub fn issue_otp(&mut self, challenge: OtpChallenge) {
        self.updated_at = challenge.issued_at;
        self.otp = Some(challenge);
    }

    /// Binds the account to a company and records the onboarding progress
    pub fn assign_company(&mut self, company_id: Uuid) {
        self.company_id = Some(company_id);
        self.registration_step = self.registration_step.max(1);
        self.updated_at = Utc::now();
    }

    /// Whether the account was registered through an identity provider
    pub fn is_federated(&self) -> bool {
        self.federated.is_some()
    }
}

/// Data needed to create an account; the store assigns the identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub federated: Option<FederatedIdentity>,
    pub otp: Option<OtpChallenge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account() -> NewAccount {
        NewAccount {
            email: "ann@example.com".to_string(),
            password_hash: Some("$2b$04$hash".to_string()),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            role: Role::Admin,
            federated: None,
            otp: None,
        }
    }

    #[test]
    fn test_from_new_defaults() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let account = Account::from_new(id, new_account(), now);

        assert_eq!(account.id, id);
        assert_eq!(account.registration_step, 0);
        assert!(!account.trial_active);
        assert!(account.company_id.is_none());
        assert!(!account.is_federated());
        assert_eq!(account.created_at, now);
    }

    #[test]
    fn test_otp_challenge_expiry_boundary() {
        let issued = Utc::now();
        let challenge = OtpChallenge::new("123456".to_string(), issued, Duration::minutes(10));

        assert_eq!(challenge.expires_at, issued + Duration::minutes(10));
        assert!(!challenge.is_expired_at(issued));
        assert!(!challenge.is_expired_at(challenge.expires_at));
        assert!(challenge.is_expired_at(challenge.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_otp_challenge_matches() {
        let challenge = OtpChallenge::new("042917".to_string(), Utc::now(), Duration::minutes(10));
        assert!(challenge.matches("042917"));
        assert!(!challenge.matches("042918"));
        assert!(!challenge.matches("42917"));
        assert!(!challenge.matches(""));
    }

    #[test]
    fn test_otp_challenge_debug_hides_code() {
        let challenge = OtpChallenge::new("987654".to_string(), Utc::now(), Duration::minutes(10));
        assert!(!format!("{:?}", challenge).contains("987654"));
    }

    #[test]
    fn test_issue_otp_replaces_challenge() {
        let mut account = Account::from_new(Uuid::new_v4(), new_account(), Utc::now());
        let first = OtpChallenge::new("111111".to_string(), Utc::now(), Duration::minutes(10));
        let second = OtpChallenge::new("222222".to_string(), Utc::now(), Duration::minutes(10));

        account.issue_otp(first);
        account.issue_otp(second.clone());
        assert_eq!(account.otp, Some(second));
    }

    #[test]
    fn test_assign_company_advances_step() {
        let mut account = Account::from_new(Uuid::new_v4(), new_account(), Utc::now());
        let company_id = Uuid::new_v4();

        account.assign_company(company_id);
        assert_eq!(account.company_id, Some(company_id));
        assert_eq!(account.registration_step, 1);

        account.registration_step = 3;
        account.assign_company(Uuid::new_v4());
        assert_eq!(account.registration_step, 3);
    }

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    }
}
