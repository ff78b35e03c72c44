//! Authentication utilities library
//!
//! Provides the session-token building blocks shared by the HTTP services:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT encoding and verification (HS256)
//! - Access/refresh token issuance with distinct secrets
//! - An injectable clock so token expiry can be tested deterministically
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenIssuer, TokenLifetimes, TokenSecrets};
//!
//! let issuer = TokenIssuer::new(
//!     TokenSecrets {
//!         access: b"access_secret_at_least_32_bytes_long".to_vec(),
//!         refresh: b"refresh_secret_at_least_32_bytes_long".to_vec(),
//!     },
//!     TokenLifetimes::default(),
//! )
//! .unwrap();
//!
//! let access = issuer.issue_access_token("user123").unwrap();
//! let claims = issuer.verify_access_token(&access).unwrap();
//! assert_eq!(claims.user_id, "user123");
//!
//! // A refresh token never verifies as an access token
//! let refresh = issuer.issue_refresh_token("user123").unwrap();
//! assert!(issuer.verify_access_token(&refresh).is_err());
//! ```

pub mod clock;
pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use issuer::TokenConfigError;
pub use issuer::TokenIssuer;
pub use issuer::TokenLifetimes;
pub use issuer::TokenSecrets;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
