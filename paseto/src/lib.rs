//! PASETO v1 and v2 tokens.
//!
//! Build tokens with [`TokenBuilder`], check them with a [`Parser`].
//!
//! ```
//! use std::time::Duration;
//!
//! use jiff::{SignedDuration, Timestamp};
//! use paseto::{ParserBuilder, SharedSecret, TokenBuilder};
//!
//! let key = SharedSecret::random()?;
//!
//! let token = TokenBuilder::v2_local(key.clone())
//!     .issuer("https://paseto.io/")
//!     .subject("alice")
//!     .expiration(Timestamp::now() + SignedDuration::from_hours(1))
//!     .compact()?;
//!
//! let parser = ParserBuilder::new()
//!     .shared_secret(key)
//!     .allowed_clock_skew(Duration::from_secs(30))
//!     .require_issuer("https://paseto.io/")
//!     .build()?;
//!
//! let token = parser.parse(&token)?;
//! assert_eq!(token.claims().subject()?, Some("alice"));
//! # Ok::<(), paseto::PasetoError>(())
//! ```
//!
//! Parsing runs in a fixed order: the token shape is checked, the footer is
//! decoded, the key is resolved, the token is authenticated, and only then are
//! `exp`, `nbf` and the required claims checked.
#![forbid(unsafe_code)]

mod builder;
mod keys;
mod parser;
mod token;

pub use builder::TokenBuilder;
pub use keys::{KeyResolver, PublicKey, SealingKey};
pub use parser::{Parser, ParserBuilder};
pub use token::Token;

pub use paseto_core::claims::{self, ClaimValue, Claims};
pub use paseto_core::encodings::{ClaimsDeserializer, ClaimsSerializer};
pub use paseto_core::footer::Footer;
pub use paseto_core::key::SharedSecret;
pub use paseto_core::validation::{ClaimPredicate, Clock, FixedClock, SystemClock};
pub use paseto_core::version::{Purpose, Version};
pub use paseto_core::{ClaimError, PasetoError};
pub use paseto_json::JsonSerializer;
pub use paseto_v1 as v1;
pub use paseto_v2 as v2;
