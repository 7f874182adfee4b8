//! Claim serialization seams.
//!
//! The token layer only ever sees bytes. How [`Claims`] become bytes is up to
//! the serializer; `paseto-json` provides the standard JSON encoding.

use std::sync::Arc;

use crate::PasetoError;
use crate::claims::Claims;

/// Turns claims into the bytes that get encrypted or signed.
pub trait ClaimsSerializer: Send + Sync {
    fn serialize(&self, claims: &Claims) -> Result<Vec<u8>, PasetoError>;
}

/// Turns authenticated payload or footer bytes back into claims.
///
/// When parsing footers, you should be aware of the risks of parsing attacker
/// controlled input before the token has been authenticated.
/// <https://github.com/paseto-standard/paseto-spec/blob/master/docs/02-Implementation-Guide/01-Payload-Processing.md#storing-json-in-the-footer>
pub trait ClaimsDeserializer: Send + Sync {
    fn deserialize(&self, bytes: &[u8]) -> Result<Claims, PasetoError>;
}

impl<T: ClaimsSerializer + ?Sized> ClaimsSerializer for Arc<T> {
    fn serialize(&self, claims: &Claims) -> Result<Vec<u8>, PasetoError> {
        T::serialize(self, claims)
    }
}

impl<T: ClaimsDeserializer + ?Sized> ClaimsDeserializer for Arc<T> {
    fn deserialize(&self, bytes: &[u8]) -> Result<Claims, PasetoError> {
        T::deserialize(self, bytes)
    }
}
