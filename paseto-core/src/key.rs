//! Symmetric key material and randomness.

use core::fmt;

use zeroize::Zeroizing;

use crate::PasetoError;

/// A shared secret used to encrypt and decrypt `local` tokens.
///
/// The bytes are zeroized on drop and never printed.
#[derive(Clone)]
pub struct SharedSecret(Zeroizing<Vec<u8>>);

impl SharedSecret {
    /// Length of keys produced by [`SharedSecret::random`].
    pub const DEFAULT_LEN: usize = 32;

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Generate a random 256-bit secret.
    pub fn random() -> Result<Self, PasetoError> {
        let mut bytes = Zeroizing::new(vec![0; Self::DEFAULT_LEN]);
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SharedSecret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<[u8; 32]> for SharedSecret {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret({} bytes)", self.0.len())
    }
}

/// Fill `buf` from the operating system CSPRNG.
///
/// There is no fallback: a missing entropy source is a configuration error.
pub fn fill_random(buf: &mut [u8]) -> Result<(), PasetoError> {
    getrandom::fill(buf)
        .map_err(|_| PasetoError::Configuration("secure random source unavailable".to_owned()))
}
