use std::sync::Arc;

use jiff::Timestamp;
use paseto_core::PasetoError;
use paseto_core::claims::{self, ClaimValue, Claims};
use paseto_core::encodings::ClaimsSerializer;
use paseto_core::key::SharedSecret;
use paseto_core::tokens::SealedToken;
use paseto_core::version::{LocalVersion, Purpose, PublicVersion};
use paseto_json::JsonSerializer;
use paseto_v1::V1;
use paseto_v2::V2;
use tracing::trace;

use crate::keys::SealingKey;

/// Builds and seals a single token.
///
/// ```
/// use paseto::{SharedSecret, TokenBuilder};
///
/// let token = TokenBuilder::v2_local(SharedSecret::random()?)
///     .subject("alice")
///     .claim("role", "admin")
///     .key_id("key-1")
///     .compact()?;
/// assert!(token.starts_with("v2.local."));
/// # Ok::<(), paseto::PasetoError>(())
/// ```
///
/// Claims are not checked when sealing: an already expired token can be built.
pub struct TokenBuilder {
    key: SealingKey,
    claims: Claims,
    footer: Option<String>,
    footer_claims: Claims,
    serializer: Arc<dyn ClaimsSerializer>,
}

impl TokenBuilder {
    pub fn new(key: SealingKey) -> Self {
        Self {
            key,
            claims: Claims::new(),
            footer: None,
            footer_claims: Claims::new(),
            serializer: Arc::new(JsonSerializer),
        }
    }

    pub fn v1_local(key: SharedSecret) -> Self {
        Self::new(SealingKey::V1Local(key))
    }

    pub fn v1_public(key: paseto_v1::SecretKey) -> Self {
        Self::new(SealingKey::V1Public(key))
    }

    pub fn v2_local(key: SharedSecret) -> Self {
        Self::new(SealingKey::V2Local(key))
    }

    pub fn v2_public(key: paseto_v2::SecretKey) -> Self {
        Self::new(SealingKey::V2Public(key))
    }

    pub fn claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name, value);
        self
    }

    pub fn footer_claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.footer_claims.insert(name, value);
        self
    }

    /// A plain string footer. If non-empty, it takes precedence over any footer claims.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn issuer(self, iss: impl Into<String>) -> Self {
        self.claim(claims::ISSUER, iss.into())
    }

    pub fn subject(self, sub: impl Into<String>) -> Self {
        self.claim(claims::SUBJECT, sub.into())
    }

    pub fn audience(self, aud: impl Into<String>) -> Self {
        self.claim(claims::AUDIENCE, aud.into())
    }

    pub fn expiration(self, exp: Timestamp) -> Self {
        self.claim(claims::EXPIRATION, exp)
    }

    pub fn not_before(self, nbf: Timestamp) -> Self {
        self.claim(claims::NOT_BEFORE, nbf)
    }

    pub fn issued_at(self, iat: Timestamp) -> Self {
        self.claim(claims::ISSUED_AT, iat)
    }

    pub fn token_id(self, jti: impl Into<String>) -> Self {
        self.claim(claims::TOKEN_ID, jti.into())
    }

    /// Sets the `kid` footer claim.
    pub fn key_id(self, kid: impl Into<String>) -> Self {
        self.footer_claim(claims::KEY_ID, kid.into())
    }

    pub fn serializer(mut self, serializer: impl ClaimsSerializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// Seal the token and encode it as `version.purpose.payload[.footer]`.
    pub fn compact(self) -> Result<String, PasetoError> {
        self.seal(None)
    }

    /// Like [`compact`](Self::compact), but `local` nonces are derived from `seed`
    /// instead of fresh randomness. Public tokens ignore the seed.
    ///
    /// Only known-answer tests should pick the seed. The same seed, key and claims
    /// always give the same token. A `local` seed must be exactly the version's
    /// seed length (32 bytes for v1, 24 for v2).
    pub fn dangerous_compact_with_seed(self, seed: &[u8]) -> Result<String, PasetoError> {
        self.seal(Some(seed))
    }

    fn seal(self, seed: Option<&[u8]>) -> Result<String, PasetoError> {
        let payload = self.serializer.serialize(&self.claims)?;
        let footer = match self.footer {
            Some(footer) if !footer.is_empty() => footer.into_bytes(),
            _ if !self.footer_claims.is_empty() => self.serializer.serialize(&self.footer_claims)?,
            _ => Vec::new(),
        };

        let token = match &self.key {
            SealingKey::V1Local(key) => encrypt::<V1>(key, seed, &payload, footer)?,
            SealingKey::V1Public(key) => sign::<V1>(key, &payload, footer)?,
            SealingKey::V2Local(key) => encrypt::<V2>(key, seed, &payload, footer)?,
            SealingKey::V2Public(key) => sign::<V2>(key, &payload, footer)?,
        };

        trace!(
            version = %token.version(),
            purpose = %token.purpose(),
            claims = self.claims.len(),
            footer_len = token.unverified_footer().len(),
            "sealed paseto token"
        );

        Ok(token.to_string())
    }
}

fn encrypt<V: LocalVersion>(
    key: &SharedSecret,
    seed: Option<&[u8]>,
    payload: &[u8],
    footer: Vec<u8>,
) -> Result<SealedToken, PasetoError> {
    let body = match seed {
        Some(seed) => V::dangerous_encrypt_with_seed(key, seed, payload, &footer)?,
        None => V::encrypt(key, payload, &footer)?,
    };
    Ok(SealedToken::new(V::VERSION, Purpose::Local, body, footer))
}

fn sign<V: PublicVersion>(
    key: &V::SecretKey,
    payload: &[u8],
    footer: Vec<u8>,
) -> Result<SealedToken, PasetoError> {
    let body = V::sign(key, payload, &footer)?;
    Ok(SealedToken::new(V::VERSION, Purpose::Public, body, footer))
}
