//! Auth orchestrator: registration, login, and profile aggregation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use super::jwt::{JwtIssuer, TokenIssuer};
use super::password::{BcryptHasher, PasswordHasher};
use super::{AuthConfig, AuthError};
use crate::models::auth::{
    IdentityField, LoginOutcome, NewIntroduction, NewUser, Registration, TokenClaims, User,
    UserId,
};
use crate::models::profile::UserProfile;
use crate::store::UserStore;

/// Orchestrates the credential store, password hasher, and token issuer.
///
/// Stateless apart from its collaborators; share it behind an `Arc`.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            token_ttl,
        }
    }

    /// Build a service with bcrypt hashing and HS256 tokens from `config`.
    pub fn from_config(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self::new(
            store,
            Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            Arc::new(JwtIssuer::new(config.jwt_secret.as_bytes())),
            Duration::seconds(config.access_token_ttl_secs),
        )
    }

    /// Access token lifetime in seconds.
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.num_seconds()
    }

    /// Register a new user, returning its ID.
    ///
    /// Nothing is written when any identity field is already taken.
    pub async fn register(&self, registration: Registration) -> Result<UserId, AuthError> {
        if self.store.exists_by_account(&registration.account).await? {
            return Err(AuthError::DuplicateIdentity(IdentityField::Account));
        }
        if self.store.exists_by_username(&registration.username).await? {
            return Err(AuthError::DuplicateIdentity(IdentityField::Username));
        }
        if self.store.exists_by_email(&registration.email).await? {
            return Err(AuthError::DuplicateIdentity(IdentityField::Email));
        }

        let Registration {
            account,
            username,
            email,
            password,
            gender,
            phone,
            address,
            date_of_birth,
            bio,
        } = registration;

        let password_hash = self.hash_password(password).await?;

        // The store re-checks uniqueness at insert, closing the check/insert race.
        let user_id = self
            .store
            .insert(NewUser {
                introduction: Some(NewIntroduction {
                    nickname: username.clone(),
                    gender,
                    phone,
                    address,
                    date_of_birth,
                    bio,
                }),
                account,
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id, "registered user");
        Ok(user_id)
    }

    /// Authenticate with account-or-email and password.
    ///
    /// Every failure returns [`AuthError::InvalidCredentials`] regardless of
    /// which check failed.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(user) = self.find_login_user(identifier).await? else {
            debug!("login rejected: unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        if user.is_disabled() {
            debug!(user_id = user.id, "login rejected: account disabled");
            return Err(AuthError::InvalidCredentials);
        }

        if !self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?
        {
            debug!(user_id = user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.store.record_login(user.id, Utc::now()).await?;

        let access_token = self.tokens.issue(user.id, &user.account, self.token_ttl)?;
        info!(user_id = user.id, "user logged in");

        Ok(LoginOutcome {
            user_id: user.id,
            access_token,
            expires_in: self.token_ttl_secs(),
        })
    }

    /// Aggregated profile for `user_id`, or `None` if no such user exists.
    pub async fn get_user_profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserProfile>, AuthError> {
        let records = self.store.find_user_records(user_id).await?;
        Ok(records.map(UserProfile::from))
    }

    /// Verify an access token by signature and expiry.
    pub fn verify_token(&self, token: &str) -> Option<TokenClaims> {
        self.tokens.verify(token)
    }

    /// Account lookup first, then email.
    async fn find_login_user(&self, identifier: &str) -> Result<Option<User>, AuthError> {
        if let Some(user) = self.store.find_by_account(identifier).await? {
            return Ok(Some(user));
        }
        Ok(self.store.find_by_email(identifier).await?)
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hash task: {e}")))?
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::Internal(format!("verify task: {e}")))?
    }
}
