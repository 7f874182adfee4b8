//! Fixtures shared by the integration tests and benches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use jiff::Timestamp;
use paseto::{Footer, KeyResolver, PasetoError, PublicKey, Purpose, SharedSecret, Version};

/// The instant every [`fixed_clock`] test runs at.
pub const NOW: &str = "2019-01-01T00:00:00Z";

/// Nonce seeds for reproducible `local` tokens.
pub const V1_SEED: [u8; 32] = [0x11; 32];
pub const V2_SEED: [u8; 24] = [0x22; 24];

pub fn now() -> Timestamp {
    NOW.parse().expect("NOW is a valid timestamp")
}

pub fn fixed_clock() -> paseto::FixedClock {
    paseto::FixedClock(now())
}

/// The 256 bit key used throughout the PASETO reference vectors.
pub fn shared_secret() -> SharedSecret {
    SharedSecret::from_bytes(
        hex::decode("707172737475767778797a7b7c7d7e7f808182838485868788898a8b8c8d8e8f")
            .expect("valid hex"),
    )
}

/// RSA key generation is slow, so every test in a binary shares one key pair.
pub fn v1_secret_key() -> paseto_v1::SecretKey {
    static KEY: OnceLock<paseto_v1::SecretKey> = OnceLock::new();
    KEY.get_or_init(|| paseto_v1::SecretKey::generate().expect("RSA key generation"))
        .clone()
}

pub fn v1_public_key() -> paseto_v1::PublicKey {
    v1_secret_key().public_key()
}

/// RFC 8032 section 7.1, test 1.
pub fn v2_secret_key() -> paseto_v2::SecretKey {
    let seed = hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
        .expect("valid hex");
    paseto_v2::SecretKey::from_bytes(&seed).expect("valid Ed25519 seed")
}

pub fn v2_public_key() -> paseto_v2::PublicKey {
    v2_secret_key().public_key()
}

/// Serves fixed keys and counts how often it was asked.
#[derive(Clone, Default)]
pub struct CountingResolver {
    pub shared_secret: Option<SharedSecret>,
    pub public_key: Option<PublicKey>,
    calls: Arc<AtomicUsize>,
}

impl CountingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shared_secret(mut self, key: SharedSecret) -> Self {
        self.shared_secret = Some(key);
        self
    }

    pub fn with_public_key(mut self, key: impl Into<PublicKey>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    /// Shares the counter with every clone.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeyResolver for CountingResolver {
    fn resolve_public_key(
        &self,
        _: Version,
        _: Purpose,
        _: &Footer,
    ) -> Result<PublicKey, PasetoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.public_key
            .clone()
            .ok_or_else(|| PasetoError::KeyResolution("no public key".to_owned()))
    }

    fn resolve_shared_key(
        &self,
        _: Version,
        _: Purpose,
        _: &Footer,
    ) -> Result<SharedSecret, PasetoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.shared_secret
            .clone()
            .ok_or_else(|| PasetoError::KeyResolution("no shared secret".to_owned()))
    }
}

/// Every supported header.
pub const ALL: [(Version, Purpose); 4] = [
    (Version::V1, Purpose::Local),
    (Version::V1, Purpose::Public),
    (Version::V2, Purpose::Local),
    (Version::V2, Purpose::Public),
];

/// A builder holding the fixture key for the given header.
pub fn token_builder(version: Version, purpose: Purpose) -> paseto::TokenBuilder {
    use paseto::TokenBuilder;

    match (version, purpose) {
        (Version::V1, Purpose::Local) => TokenBuilder::v1_local(shared_secret()),
        (Version::V1, Purpose::Public) => TokenBuilder::v1_public(v1_secret_key()),
        (Version::V2, Purpose::Local) => TokenBuilder::v2_local(shared_secret()),
        (Version::V2, Purpose::Public) => TokenBuilder::v2_public(v2_secret_key()),
    }
}

/// A parser builder that knows every fixture key and runs at [`NOW`].
pub fn parser_builder() -> paseto::ParserBuilder {
    paseto::ParserBuilder::new()
        .shared_secret(shared_secret())
        .public_key(v1_public_key())
        .public_key(v2_public_key())
        .clock(fixed_clock())
}
