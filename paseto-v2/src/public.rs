use core::fmt;

use ed25519_dalek::{Signature, Signer};
use paseto_core::PasetoError;
use paseto_core::pae::pae;
use paseto_core::version::{PublicVersion, Version};
use zeroize::Zeroizing;

use crate::V2;

const SIGNATURE_LEN: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// An Ed25519 signing key for `v2.public.` tokens.
#[derive(Clone)]
pub struct SecretKey(ed25519_dalek::SigningKey);

/// An Ed25519 verifying key for `v2.public.` tokens.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(ed25519_dalek::VerifyingKey);

impl SecretKey {
    pub fn generate() -> Result<Self, PasetoError> {
        let mut seed = Zeroizing::new([0; ed25519_dalek::SECRET_KEY_LENGTH]);
        paseto_core::key::fill_random(&mut *seed)?;
        Ok(Self::from_seed(&seed))
    }

    /// From the 32 byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(seed))
    }

    /// From a 32 byte seed, or the 64 byte `seed || public key` form. In the
    /// latter case the public half must match the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PasetoError> {
        if let Ok(seed) = <&[u8; 32]>::try_from(bytes) {
            return Ok(Self::from_seed(seed));
        }
        let keypair = <&[u8; 64]>::try_from(bytes).map_err(|_| {
            PasetoError::KeyResolution(format!(
                "v2.public secret keys are 32 or 64 bytes, got {}",
                bytes.len()
            ))
        })?;
        ed25519_dalek::SigningKey::from_keypair_bytes(keypair)
            .map(Self)
            .map_err(|_| {
                PasetoError::KeyResolution("Ed25519 public key does not match the seed".to_owned())
            })
    }

    pub fn to_seed(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.0.to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PasetoError> {
        let bytes = <&[u8; 32]>::try_from(bytes).map_err(|_| {
            PasetoError::KeyResolution(format!(
                "v2.public public keys are 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|_| PasetoError::KeyResolution("invalid Ed25519 public key".to_owned()))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("v2::SecretKey(Ed25519)")
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("v2::PublicKey(Ed25519)")
    }
}

impl PublicVersion for V2 {
    const VERSION: Version = Version::V2;
    const HEADER: &'static str = "v2.public.";
    const SIGNATURE_LEN: usize = SIGNATURE_LEN;

    type SecretKey = SecretKey;
    type PublicKey = PublicKey;

    fn sign(key: &SecretKey, message: &[u8], footer: &[u8]) -> Result<Vec<u8>, PasetoError> {
        let signature = key.0.sign(&preauth_public(message, footer));

        let mut out = Vec::with_capacity(message.len() + SIGNATURE_LEN);
        out.extend_from_slice(message);
        out.extend_from_slice(&signature.to_bytes());
        Ok(out)
    }

    fn verify<'a>(
        key: &PublicKey,
        body: &'a [u8],
        footer: &[u8],
    ) -> Result<&'a [u8], PasetoError> {
        let (message, tag) = body
            .split_last_chunk::<SIGNATURE_LEN>()
            .ok_or(PasetoError::AuthenticationFailed)?;

        let signature = Signature::from_bytes(tag);
        key.0
            .verify_strict(&preauth_public(message, footer), &signature)
            .map_err(|_| PasetoError::AuthenticationFailed)?;

        Ok(message)
    }
}

fn preauth_public(message: &[u8], footer: &[u8]) -> Vec<u8> {
    pae(&[<V2 as PublicVersion>::HEADER.as_bytes(), message, footer])
}
