//! Token footers.
//!
//! A footer is either an opaque string or a JSON-like map of claims. Which one is
//! decided by looking at the decoded bytes: anything that starts with `{` and ends
//! with `}` is handed to the claims deserializer.

use crate::PasetoError;
use crate::claims::{Claims, KEY_ID};
use crate::encodings::{ClaimsDeserializer, ClaimsSerializer};

/// The authenticated (but never encrypted) trailer of a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Footer {
    value: String,
    claims: Claims,
}

impl Footer {
    /// No footer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A plain string footer.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            claims: Claims::new(),
        }
    }

    /// A structured footer. The raw value is the serialized form of `claims`.
    pub fn from_claims(
        claims: Claims,
        serializer: &dyn ClaimsSerializer,
    ) -> Result<Self, PasetoError> {
        if claims.is_empty() {
            return Ok(Self::empty());
        }
        let bytes = serializer.serialize(&claims)?;
        let value = String::from_utf8(bytes)
            .map_err(|_| PasetoError::Serialization("footer is not valid UTF-8".to_owned()))?;
        Ok(Self { value, claims })
    }

    /// Detect the footer format from the decoded footer segment.
    pub fn decode(bytes: &[u8], deserializer: &dyn ClaimsDeserializer) -> Result<Self, PasetoError> {
        if bytes.is_empty() {
            return Ok(Self::empty());
        }

        if bytes.starts_with(b"{") && bytes.ends_with(b"}") {
            let claims = deserializer.deserialize(bytes)?;
            Ok(Self {
                value: String::from_utf8_lossy(bytes).into_owned(),
                claims,
            })
        } else {
            Ok(Self::from_utf8_lossy(bytes))
        }
    }

    /// A plain string footer from unauthenticated bytes.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a corrupted footer
    /// reaches the MAC or signature check instead of failing early.
    pub fn from_utf8_lossy(bytes: &[u8]) -> Self {
        Self::from_string(String::from_utf8_lossy(bytes))
    }

    /// The footer text exactly as it was authenticated.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Structured footer claims. Empty for plain string footers.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// The registered `kid` footer claim.
    pub fn key_id(&self) -> Result<Option<&str>, PasetoError> {
        self.claims.get_str(KEY_ID)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }
}
