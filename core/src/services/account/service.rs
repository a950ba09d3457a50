//! Main account lifecycle service implementation

use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount, NotificationJob, OtpChallenge};
use crate::domain::value_objects::{AccountSummary, AuthResult};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{complete, AccountRepository, TransactionManager};
use crate::services::notification::{NotificationDispatcher, Notifier};
use crate::services::security::{Clock, OtpGenerator, PasswordHasher, SystemClock};
use crate::services::token::TokenIssuer;

use super::config::AccountServiceConfig;
use super::types::{Credentials, RegisterRequest};

/// Account lifecycle service
///
/// Every public operation opens exactly one transaction on `M`, runs all of
/// its reads and writes through it, and commits only if the whole operation
/// succeeds. Notifier failures are logged by the dispatcher and never change
/// the outcome.
pub struct AccountService<M, A, N: Notifier + ?Sized = dyn Notifier> {
    store: Arc<M>,
    accounts: Arc<A>,
    dispatcher: NotificationDispatcher<N>,
    hasher: PasswordHasher,
    otp: OtpGenerator,
    tokens: Arc<TokenIssuer>,
    clock: Arc<dyn Clock>,
    config: AccountServiceConfig,
}

impl<M, A, N> AccountService<M, A, N>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    N: Notifier + ?Sized,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `store` - Opens the transaction each operation runs in
    /// * `accounts` - Account persistence inside that transaction
    /// * `notifier` - OTP email delivery
    /// * `tokens` - Session token issuer
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<M>,
        accounts: Arc<A>,
        notifier: Arc<N>,
        tokens: Arc<TokenIssuer>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            store,
            accounts,
            dispatcher: NotificationDispatcher::new(notifier, config.dispatch_timeout),
            hasher: PasswordHasher::new(config.password_cost),
            otp: OtpGenerator::new(config.otp_length),
            tokens,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &AccountServiceConfig {
        &self.config
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Rejects an email that already has an account
    /// 2. Hashes the password, if one was supplied
    /// 3. Attaches a fresh OTP challenge and persists the account
    /// 4. Dispatches the OTP email and waits for the attempt to finish
    /// 5. Mints a session token when enabled
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResult)` - Account committed, OTP email attempted
    /// * `Err(DomainError::Auth(AuthError::DuplicateAccount))` - Email taken; nothing is sent
    /// * `Err(DomainError)` - Storage, hashing or signing failure; nothing is committed
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<AuthResult> {
        let mut tx = self.store.begin().await?;
        let outcome = self.register_in(&mut tx, request).await;
        complete(tx, outcome).await
    }

    async fn register_in(&self, tx: &mut M::Tx, request: RegisterRequest) -> DomainResult<AuthResult> {
        if self.accounts.find_by_email(tx, &request.email).await?.is_some() {
            return Err(AuthError::DuplicateAccount.into());
        }

        let (password_hash, federated) = match request.credentials {
            Credentials::Password(password) => {
                let digest = self.hasher.hash_blocking(password.into_inner()).await?;
                (Some(digest), None)
            }
            Credentials::Federated(identity) => (None, Some(identity)),
        };

        let challenge = self.new_challenge()?;
        let account = self
            .accounts
            .create(
                tx,
                NewAccount {
                    email: request.email,
                    password_hash,
                    first_name: request.first_name,
                    last_name: request.last_name,
                    role: self.config.default_role,
                    federated,
                    otp: Some(challenge.clone()),
                },
            )
            .await?;

        let dispatch = self.dispatcher.dispatch(NotificationJob::otp(&account, &challenge));

        let token = self
            .config
            .issue_session_token
            .then(|| self.tokens.issue_at(&account.email, account.role, self.clock.now()));

        // Failure is already logged by the dispatcher
        let _ = dispatch.join().await;

        let token = token.transpose()?;
        Ok(AuthResult::new(&account, token))
    }

    /// Look up an account by email
    pub async fn lookup_by_email(&self, email: &str) -> DomainResult<AccountSummary> {
        let mut tx = self.store.begin().await?;
        let outcome = self
            .find_account(&mut tx, email)
            .await
            .map(|account| AccountSummary::from(&account));
        complete(tx, outcome).await
    }

    /// Check a submitted OTP code against the account's current challenge
    ///
    /// Expiry is checked before the code. The challenge is left in place.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Code matches and has not expired
    /// * `Err(DomainError::Auth(AuthError::AccountNotFound))` - Unknown email
    /// * `Err(DomainError::Auth(AuthError::OtpExpired))` - Validity window has passed
    /// * `Err(DomainError::Auth(AuthError::OtpMismatch))` - Wrong code, or no challenge issued
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<()> {
        let mut tx = self.store.begin().await?;
        let outcome = self.verify_otp_in(&mut tx, email, code).await;
        complete(tx, outcome).await
    }

    async fn verify_otp_in(&self, tx: &mut M::Tx, email: &str, code: &str) -> DomainResult<()> {
        let account = self.find_account(tx, email).await?;
        let challenge = account.otp.as_ref().ok_or(AuthError::OtpMismatch)?;

        if challenge.is_expired_at(self.clock.now()) {
            return Err(AuthError::OtpExpired.into());
        }
        if !challenge.matches(code) {
            return Err(AuthError::OtpMismatch.into());
        }
        Ok(())
    }

    /// Replace the account's OTP challenge and email the new code
    ///
    /// The previous code stops verifying once this commits.
    pub async fn reissue_otp(&self, email: &str) -> DomainResult<()> {
        let mut tx = self.store.begin().await?;
        let outcome = self.reissue_otp_in(&mut tx, email).await;
        complete(tx, outcome).await
    }

    async fn reissue_otp_in(&self, tx: &mut M::Tx, email: &str) -> DomainResult<()> {
        let mut account = self.find_account(tx, email).await?;

        let challenge = self.new_challenge()?;
        account.issue_otp(challenge.clone());
        let account = self.accounts.update(tx, account).await?;

        let _ = self
            .dispatcher
            .dispatch(NotificationJob::otp(&account, &challenge))
            .join()
            .await;
        Ok(())
    }

    async fn find_account(&self, tx: &mut M::Tx, email: &str) -> DomainResult<Account> {
        self.accounts
            .find_by_email(tx, email)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }

    fn new_challenge(&self) -> DomainResult<OtpChallenge> {
        let code = self.otp.generate()?;
        Ok(OtpChallenge::new(code, self.clock.now(), self.config.otp_validity))
    }
}
