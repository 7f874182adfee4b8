use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use paseto_core::PasetoError;
use paseto_core::claims::{self, ClaimValue};
use paseto_core::encodings::ClaimsDeserializer;
use paseto_core::footer::Footer;
use paseto_core::key::SharedSecret;
use paseto_core::tokens::SealedToken;
use paseto_core::validation::{
    ClaimPredicate, Clock, RequiredClaims, SystemClock, TimeWindow, Validate,
};
use paseto_core::version::{LocalVersion, Purpose, PublicVersion, Version};
use paseto_json::JsonSerializer;
use paseto_v1::V1;
use paseto_v2::V2;
use tracing::debug;

use crate::keys::{DirectKeys, KeyResolver, PublicKey};
use crate::token::Token;

/// Configures a [`Parser`].
///
/// Keys come either from [`shared_secret`](Self::shared_secret) and
/// [`public_key`](Self::public_key), or from a [`KeyResolver`]. Not both.
pub struct ParserBuilder {
    keys: DirectKeys,
    resolver: Option<Box<dyn KeyResolver>>,
    deserializer: Arc<dyn ClaimsDeserializer>,
    clock: Arc<dyn Clock>,
    allowed_clock_skew: Duration,
    required: RequiredClaims,
    required_footer: RequiredClaims,
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self {
            keys: DirectKeys::default(),
            resolver: None,
            deserializer: Arc::new(JsonSerializer),
            clock: Arc::new(SystemClock),
            allowed_clock_skew: Duration::ZERO,
            required: RequiredClaims::new(),
            required_footer: RequiredClaims::new(),
        }
    }
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The secret for `local` tokens of either version.
    pub fn shared_secret(mut self, key: impl Into<SharedSecret>) -> Self {
        self.keys.shared_secret = Some(key.into());
        self
    }

    /// The key for `public` tokens of the key's version. One key per version.
    pub fn public_key(mut self, key: impl Into<PublicKey>) -> Self {
        match key.into() {
            PublicKey::V1(key) => self.keys.v1_public = Some(key),
            PublicKey::V2(key) => self.keys.v2_public = Some(key),
        }
        self
    }

    pub fn key_resolver(mut self, resolver: impl KeyResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn deserializer(mut self, deserializer: impl ClaimsDeserializer + 'static) -> Self {
        self.deserializer = Arc::new(deserializer);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Leeway applied to `exp` and `nbf`. Zero by default.
    pub fn allowed_clock_skew(mut self, skew: Duration) -> Self {
        self.allowed_clock_skew = skew;
        self
    }

    /// Require a payload claim to be present and satisfy `predicate`.
    pub fn require(mut self, name: impl Into<String>, predicate: ClaimPredicate) -> Self {
        self.required.insert(name, predicate);
        self
    }

    /// Require a footer claim to be present and satisfy `predicate`.
    pub fn require_footer(mut self, name: impl Into<String>, predicate: ClaimPredicate) -> Self {
        self.required_footer.insert(name, predicate);
        self
    }

    /// Require a payload claim to equal `value`.
    pub fn require_claim(self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.require(name, ClaimPredicate::equal_to(value))
    }

    pub fn require_issuer(self, iss: impl Into<String>) -> Self {
        self.require_claim(claims::ISSUER, iss.into())
    }

    pub fn require_subject(self, sub: impl Into<String>) -> Self {
        self.require_claim(claims::SUBJECT, sub.into())
    }

    pub fn require_audience(self, aud: impl Into<String>) -> Self {
        self.require_claim(claims::AUDIENCE, aud.into())
    }

    pub fn require_expiration(self, exp: Timestamp) -> Self {
        self.require_claim(claims::EXPIRATION, exp)
    }

    pub fn require_not_before(self, nbf: Timestamp) -> Self {
        self.require_claim(claims::NOT_BEFORE, nbf)
    }

    pub fn require_issued_at(self, iat: Timestamp) -> Self {
        self.require_claim(claims::ISSUED_AT, iat)
    }

    pub fn require_token_id(self, jti: impl Into<String>) -> Self {
        self.require_claim(claims::TOKEN_ID, jti.into())
    }

    /// Require the `kid` footer claim to equal `kid`.
    pub fn require_key_id(self, kid: impl Into<String>) -> Self {
        self.require_footer(claims::KEY_ID, ClaimPredicate::equal_to(kid.into()))
    }

    pub fn build(self) -> Result<Parser, PasetoError> {
        let resolver: Box<dyn KeyResolver> = match (self.resolver, self.keys.is_empty()) {
            (Some(_), false) => {
                return Err(PasetoError::Configuration(
                    "a key resolver cannot be combined with directly configured keys".to_owned(),
                ));
            }
            (None, true) => {
                return Err(PasetoError::Configuration(
                    "no keys or key resolver configured".to_owned(),
                ));
            }
            (Some(resolver), true) => resolver,
            (None, false) => Box::new(self.keys),
        };

        Ok(Parser {
            resolver,
            deserializer: self.deserializer,
            clock: self.clock,
            allowed_clock_skew: self.allowed_clock_skew,
            required: self.required,
            required_footer: self.required_footer,
        })
    }
}

/// Authenticates, decodes and validates tokens. Reusable and shareable across threads.
pub struct Parser {
    resolver: Box<dyn KeyResolver>,
    deserializer: Arc<dyn ClaimsDeserializer>,
    clock: Arc<dyn Clock>,
    allowed_clock_skew: Duration,
    required: RequiredClaims,
    required_footer: RequiredClaims,
}

impl Parser {
    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    pub fn parse(&self, token: &str) -> Result<Token, PasetoError> {
        match self.decode(token) {
            Ok(token) => {
                debug!(
                    version = %token.version(),
                    purpose = %token.purpose(),
                    "paseto token accepted"
                );
                Ok(token)
            }
            Err(err) => {
                match &err {
                    PasetoError::Claim(claim) => {
                        debug!(reason = err.kind(), claim = claim.claim(), "paseto token rejected")
                    }
                    _ => debug!(reason = err.kind(), "paseto token rejected"),
                }
                Err(err)
            }
        }
    }

    fn decode(&self, token: &str) -> Result<Token, PasetoError> {
        let sealed: SealedToken = token.parse()?;
        let (version, purpose) = (sealed.version(), sealed.purpose());
        // A braced footer that does not deserialize is only reported once the
        // token authenticates. Until then it is treated as plain text.
        let (footer, footer_error) =
            match Footer::decode(sealed.unverified_footer(), &*self.deserializer) {
                Ok(footer) => (footer, None),
                Err(err) => (Footer::from_utf8_lossy(sealed.unverified_footer()), Some(err)),
            };

        let payload = match purpose {
            Purpose::Local => {
                let key = self.resolver.resolve_shared_key(version, purpose, &footer)?;
                match version {
                    Version::V1 => V1::decrypt(&key, sealed.payload(), sealed.unverified_footer())?,
                    Version::V2 => V2::decrypt(&key, sealed.payload(), sealed.unverified_footer())?,
                }
            }
            Purpose::Public => {
                let key = self.resolver.resolve_public_key(version, purpose, &footer)?;
                verify(&sealed, &key)?.to_vec()
            }
        };

        if let Some(err) = footer_error {
            return Err(err);
        }

        let claims = self.deserializer.deserialize(&payload)?;

        TimeWindow::valid_at(self.clock.now())
            .with_leeway(self.allowed_clock_skew)
            .then(&self.required)
            .validate(&claims)?;
        self.required_footer.validate(footer.claims())?;

        Ok(Token::new(version, purpose, claims, footer))
    }
}

fn verify<'a>(sealed: &'a SealedToken, key: &PublicKey) -> Result<&'a [u8], PasetoError> {
    let (body, footer) = (sealed.payload(), sealed.unverified_footer());
    match (sealed.version(), key) {
        (Version::V1, PublicKey::V1(key)) => <V1 as PublicVersion>::verify(key, body, footer),
        (Version::V2, PublicKey::V2(key)) => <V2 as PublicVersion>::verify(key, body, footer),
        (version, key) => Err(PasetoError::KeyResolution(format!(
            "resolved a {} public key for a {version} token",
            key.version()
        ))),
    }
}
