//! PASETO v2 (RustCrypto)
//!
//! * `v2.local.` tokens: XChaCha20-Poly1305 with a BLAKE2b derived nonce.
//! * `v2.public.` tokens: Ed25519 signatures.
//!
//! ```
//! use paseto_core::version::PublicVersion;
//! use paseto_v2::{SecretKey, V2};
//!
//! let secret_key = SecretKey::generate().unwrap();
//! let public_key = secret_key.public_key();
//!
//! let body = V2::sign(&secret_key, br#"{"sub":"alice"}"#, b"").unwrap();
//! let message = V2::verify(&public_key, &body, b"").unwrap();
//! assert_eq!(message, br#"{"sub":"alice"}"#);
//! ```
#![forbid(unsafe_code)]

mod local;
mod public;

pub use paseto_core::PasetoError;
pub use public::{PublicKey, SecretKey};

/// PASETO version 2.
pub struct V2;
