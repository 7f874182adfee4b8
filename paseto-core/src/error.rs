//! The error taxonomy shared by every PASETO operation.
//!
//! Authentication failures are deliberately opaque. The other kinds carry enough
//! context to log why a token was rejected, but callers should treat every kind
//! as "reject this token".

use thiserror::Error;

/// Error returned for all PASETO operations that can fail
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PasetoError {
    /// The token did not have the `version.purpose.payload[.footer]` shape.
    #[error("malformed token: {0}")]
    MalformedToken(&'static str),

    /// A payload or footer segment was not unpadded base64url.
    #[error("the token could not be base64url decoded")]
    MalformedEncoding,

    /// The token header names a PASETO version or purpose this library does not implement.
    #[error("paseto token with header '{version}.{purpose}.' is not supported")]
    UnsupportedToken { version: String, purpose: String },

    /// No usable key was available for the token.
    #[error("key resolution failed: {0}")]
    KeyResolution(String),

    /// The MAC, AEAD tag or signature did not verify.
    #[error("token authentication failed")]
    AuthenticationFailed,

    /// The token authenticated but its claims were rejected.
    #[error(transparent)]
    Claim(#[from] ClaimError),

    /// Claims or footer bytes could not be (de)serialized, or a claim had an unexpected type.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The builder or parser was configured incorrectly.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl PasetoError {
    /// A short, stable name for the error kind, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            PasetoError::MalformedToken(_) => "malformed_token",
            PasetoError::MalformedEncoding => "malformed_encoding",
            PasetoError::UnsupportedToken { .. } => "unsupported_token",
            PasetoError::KeyResolution(_) => "key_resolution",
            PasetoError::AuthenticationFailed => "authentication_failed",
            PasetoError::Claim(ClaimError::Expired { .. }) => "expired",
            PasetoError::Claim(ClaimError::Premature { .. }) => "premature",
            PasetoError::Claim(ClaimError::MissingClaim { .. }) => "missing_claim",
            PasetoError::Claim(ClaimError::IncorrectClaim { .. }) => "incorrect_claim",
            PasetoError::Serialization(_) => "serialization",
            PasetoError::Configuration(_) => "configuration",
        }
    }
}

/// A claim failed post-decode validation.
///
/// Every variant names the claim and describes what was expected of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The `exp` claim is in the past, even after allowing for clock skew.
    #[error("{description}")]
    Expired {
        claim: String,
        description: String,
    },

    /// The `nbf` claim is in the future, even after allowing for clock skew.
    #[error("{description}")]
    Premature {
        claim: String,
        description: String,
    },

    /// A required claim was not present.
    #[error("expected '{claim}' claim to be {description}, but was not present in the paseto claims")]
    MissingClaim { claim: String, description: String },

    /// A required claim was present but did not satisfy its predicate.
    #[error("expected '{claim}' claim to be {description}, but was: '{actual}'")]
    IncorrectClaim {
        claim: String,
        description: String,
        actual: String,
    },
}

impl ClaimError {
    /// The name of the claim that failed validation.
    pub fn claim(&self) -> &str {
        match self {
            ClaimError::Expired { claim, .. }
            | ClaimError::Premature { claim, .. }
            | ClaimError::MissingClaim { claim, .. }
            | ClaimError::IncorrectClaim { claim, .. } => claim,
        }
    }

    /// The human readable description of the failed expectation.
    pub fn description(&self) -> &str {
        match self {
            ClaimError::Expired { description, .. }
            | ClaimError::Premature { description, .. }
            | ClaimError::MissingClaim { description, .. }
            | ClaimError::IncorrectClaim { description, .. } => description,
        }
    }
}
