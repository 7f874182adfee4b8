//! Core types for PASETO v1 and v2 tokens.
//!
//! This crate holds everything that does not depend on a particular cipher suite:
//! the compact wire format, pre-authentication encoding, the claim model and
//! claim validation. The cipher suites live in `paseto-v1` and `paseto-v2`.

#![forbid(unsafe_code)]

pub mod base64;
pub mod claims;
pub mod encodings;
mod error;
pub mod footer;
pub mod key;
pub mod pae;
pub mod tokens;
pub mod validation;
pub mod version;

pub use error::{ClaimError, PasetoError};
pub use jiff;
