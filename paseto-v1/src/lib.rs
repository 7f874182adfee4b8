//! PASETO v1 (RustCrypto)
//!
//! * `v1.local.` tokens: AES-256-CTR encryption with an HMAC-SHA384 tag, keys
//!   derived with HKDF-SHA384.
//! * `v1.public.` tokens: RSASSA-PSS signatures with SHA-384 over RSA-2048 keys.
//!
//! ```no_run
//! use paseto_core::key::SharedSecret;
//! use paseto_core::version::LocalVersion;
//! use paseto_v1::V1;
//!
//! let key = SharedSecret::random().unwrap();
//! let body = V1::encrypt(&key, br#"{"sub":"alice"}"#, b"").unwrap();
//! let payload = V1::decrypt(&key, &body, b"").unwrap();
//! assert_eq!(payload, br#"{"sub":"alice"}"#);
//! ```
#![forbid(unsafe_code)]

mod local;
mod public;

pub use paseto_core::PasetoError;
pub use public::{PublicKey, SecretKey};

/// PASETO version 1.
pub struct V1;
