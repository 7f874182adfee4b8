//! Version tagged keys and key resolution.

use paseto_core::PasetoError;
use paseto_core::footer::Footer;
use paseto_core::key::SharedSecret;
use paseto_core::version::{Purpose, Version};

/// A key that can seal a token. The variant picks the version and purpose.
#[derive(Clone, Debug)]
pub enum SealingKey {
    V1Local(SharedSecret),
    V1Public(paseto_v1::SecretKey),
    V2Local(SharedSecret),
    V2Public(paseto_v2::SecretKey),
}

impl SealingKey {
    pub fn version(&self) -> Version {
        match self {
            SealingKey::V1Local(_) | SealingKey::V1Public(_) => Version::V1,
            SealingKey::V2Local(_) | SealingKey::V2Public(_) => Version::V2,
        }
    }

    pub fn purpose(&self) -> Purpose {
        match self {
            SealingKey::V1Local(_) | SealingKey::V2Local(_) => Purpose::Local,
            SealingKey::V1Public(_) | SealingKey::V2Public(_) => Purpose::Public,
        }
    }
}

impl From<paseto_v1::SecretKey> for SealingKey {
    fn from(key: paseto_v1::SecretKey) -> Self {
        SealingKey::V1Public(key)
    }
}

impl From<paseto_v2::SecretKey> for SealingKey {
    fn from(key: paseto_v2::SecretKey) -> Self {
        SealingKey::V2Public(key)
    }
}

/// A key that can verify a `public` token.
#[derive(Clone, Debug, PartialEq)]
pub enum PublicKey {
    V1(paseto_v1::PublicKey),
    V2(paseto_v2::PublicKey),
}

impl PublicKey {
    pub fn version(&self) -> Version {
        match self {
            PublicKey::V1(_) => Version::V1,
            PublicKey::V2(_) => Version::V2,
        }
    }
}

impl From<paseto_v1::PublicKey> for PublicKey {
    fn from(key: paseto_v1::PublicKey) -> Self {
        PublicKey::V1(key)
    }
}

impl From<paseto_v2::PublicKey> for PublicKey {
    fn from(key: paseto_v2::PublicKey) -> Self {
        PublicKey::V2(key)
    }
}

/// Picks the key for a token once its header and footer are known.
///
/// Called exactly once per parse, before the token is authenticated. The footer
/// has not been authenticated yet either, so treat `kid` and friends as hints.
/// Both methods fail by default; implement the ones you support.
pub trait KeyResolver: Send + Sync {
    fn resolve_public_key(
        &self,
        version: Version,
        purpose: Purpose,
        footer: &Footer,
    ) -> Result<PublicKey, PasetoError> {
        let _ = footer;
        Err(PasetoError::KeyResolution(format!(
            "this resolver cannot provide a public key for {version}.{purpose} tokens"
        )))
    }

    fn resolve_shared_key(
        &self,
        version: Version,
        purpose: Purpose,
        footer: &Footer,
    ) -> Result<SharedSecret, PasetoError> {
        let _ = footer;
        Err(PasetoError::KeyResolution(format!(
            "this resolver cannot provide a shared secret for {version}.{purpose} tokens"
        )))
    }
}

/// The resolver behind [`ParserBuilder::shared_secret`](crate::ParserBuilder::shared_secret)
/// and [`ParserBuilder::public_key`](crate::ParserBuilder::public_key).
#[derive(Clone, Debug, Default)]
pub(crate) struct DirectKeys {
    pub(crate) shared_secret: Option<SharedSecret>,
    pub(crate) v1_public: Option<paseto_v1::PublicKey>,
    pub(crate) v2_public: Option<paseto_v2::PublicKey>,
}

impl DirectKeys {
    pub(crate) fn is_empty(&self) -> bool {
        self.shared_secret.is_none() && self.v1_public.is_none() && self.v2_public.is_none()
    }
}

impl KeyResolver for DirectKeys {
    fn resolve_public_key(
        &self,
        version: Version,
        _: Purpose,
        _: &Footer,
    ) -> Result<PublicKey, PasetoError> {
        let key = match version {
            Version::V1 => self.v1_public.clone().map(PublicKey::V1),
            Version::V2 => self.v2_public.map(PublicKey::V2),
        };
        key.ok_or_else(|| {
            PasetoError::KeyResolution(format!("no {version} public key configured"))
        })
    }

    fn resolve_shared_key(
        &self,
        _: Version,
        _: Purpose,
        _: &Footer,
    ) -> Result<SharedSecret, PasetoError> {
        self.shared_secret
            .clone()
            .ok_or_else(|| PasetoError::KeyResolution("no shared secret configured".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;
    impl KeyResolver for Nothing {}

    #[test]
    fn default_methods_fail() {
        let err = Nothing
            .resolve_shared_key(Version::V2, Purpose::Local, &Footer::empty())
            .unwrap_err();
        assert!(matches!(err, PasetoError::KeyResolution(_)));

        let err = Nothing
            .resolve_public_key(Version::V1, Purpose::Public, &Footer::empty())
            .unwrap_err();
        assert!(matches!(err, PasetoError::KeyResolution(_)));
    }

    #[test]
    fn direct_keys_only_serve_what_they_hold() {
        let public = paseto_v2::SecretKey::from_seed(&[1; 32]).public_key();
        let keys = DirectKeys {
            v2_public: Some(public),
            ..DirectKeys::default()
        };

        assert_eq!(
            keys.resolve_public_key(Version::V2, Purpose::Public, &Footer::empty())
                .unwrap(),
            PublicKey::V2(public)
        );
        assert!(matches!(
            keys.resolve_public_key(Version::V1, Purpose::Public, &Footer::empty()),
            Err(PasetoError::KeyResolution(_))
        ));
        assert!(matches!(
            keys.resolve_shared_key(Version::V2, Purpose::Local, &Footer::empty()),
            Err(PasetoError::KeyResolution(_))
        ));
    }

    #[test]
    fn key_versions() {
        let secret = paseto_v2::SecretKey::from_seed(&[1; 32]);
        assert_eq!(PublicKey::from(secret.public_key()).version(), Version::V2);

        let key = SealingKey::from(secret);
        assert_eq!((key.version(), key.purpose()), (Version::V2, Purpose::Public));
        assert_eq!(
            SealingKey::V1Local(SharedSecret::from_bytes([0; 32])).purpose(),
            Purpose::Local
        );
    }
}
