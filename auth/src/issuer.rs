use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use thiserror::Error;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Signing secrets, one per token kind.
#[derive(Clone)]
pub struct TokenSecrets {
    pub access: Vec<u8>,
    pub refresh: Vec<u8>,
}

/// Validity windows for the two token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

/// Rejected token configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenConfigError {
    #[error("{0} token secret must not be empty")]
    EmptySecret(&'static str),

    #[error("Access and refresh tokens must be signed with different secrets")]
    SharedSecret,

    #[error("{0} token lifetime must be positive")]
    NonPositiveLifetime(&'static str),

    #[error("Refresh token lifetime must not be shorter than access token lifetime")]
    RefreshShorterThanAccess,
}

/// Issues and verifies access and refresh tokens.
///
/// Each kind is signed with its own secret, so a token of one kind never
/// verifies as the other. Time comes from the injected [`Clock`].
pub struct TokenIssuer {
    access: JwtHandler,
    refresh: JwtHandler,
    lifetimes: TokenLifetimes,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer using the wall clock.
    ///
    /// # Errors
    /// * `EmptySecret` - Either secret is empty
    /// * `SharedSecret` - Both kinds would be signed with the same secret
    /// * `NonPositiveLifetime` - A lifetime is zero or negative
    /// * `RefreshShorterThanAccess` - Refresh tokens would expire before access tokens
    pub fn new(secrets: TokenSecrets, lifetimes: TokenLifetimes) -> Result<Self, TokenConfigError> {
        if secrets.access.is_empty() {
            return Err(TokenConfigError::EmptySecret("Access"));
        }
        if secrets.refresh.is_empty() {
            return Err(TokenConfigError::EmptySecret("Refresh"));
        }
        if secrets.access == secrets.refresh {
            return Err(TokenConfigError::SharedSecret);
        }
        if lifetimes.access <= Duration::zero() {
            return Err(TokenConfigError::NonPositiveLifetime("Access"));
        }
        if lifetimes.refresh <= Duration::zero() {
            return Err(TokenConfigError::NonPositiveLifetime("Refresh"));
        }
        if lifetimes.refresh < lifetimes.access {
            return Err(TokenConfigError::RefreshShorterThanAccess);
        }

        Ok(Self {
            access: JwtHandler::new(&secrets.access),
            refresh: JwtHandler::new(&secrets.refresh),
            lifetimes,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Lifetime of refresh tokens, also the Max-Age of the cookie carrying them.
    pub fn refresh_lifetime(&self) -> Duration {
        self.lifetimes.refresh
    }

    pub fn issue_access_token(&self, user_id: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, self.now(), self.lifetimes.access);
        self.access.encode(&claims)
    }

    pub fn issue_refresh_token(&self, user_id: impl ToString) -> Result<String, JwtError> {
        self.issue_refresh_token_at(user_id, self.now())
    }

    /// Issue a refresh token stamped at `issued_at` rather than now.
    ///
    /// Expiry runs from `issued_at`.
    pub fn issue_refresh_token_at(
        &self,
        user_id: impl ToString,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, issued_at, self.lifetimes.refresh);
        self.refresh.encode(&claims)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.access.verify(token, self.now().timestamp())
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.refresh.verify(token, self.now().timestamp())
    }
}
