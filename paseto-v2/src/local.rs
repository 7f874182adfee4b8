use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use digest::Mac;
use digest::consts::U24;
use paseto_core::PasetoError;
use paseto_core::key::SharedSecret;
use paseto_core::pae::pae;
use paseto_core::version::{LocalVersion, Version};

use crate::V2;

const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;

impl LocalVersion for V2 {
    const VERSION: Version = Version::V2;
    const HEADER: &'static str = "v2.local.";
    const SEED_LEN: usize = 24;

    fn dangerous_encrypt_with_seed(
        key: &SharedSecret,
        seed: &[u8],
        payload: &[u8],
        footer: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        let cipher = cipher(key)?;
        let nonce = nonce(seed, payload)?;

        let aad = preauth_local(&nonce, footer);
        let ciphertext = cipher
            .encrypt(XNonce::from_slice(&nonce), Payload { msg: payload, aad: &aad })
            .map_err(|_| PasetoError::Configuration("XChaCha20-Poly1305 encryption failed".to_owned()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(key: &SharedSecret, body: &[u8], footer: &[u8]) -> Result<Vec<u8>, PasetoError> {
        let cipher = cipher(key)?;

        if body.len() < NONCE_LEN + TAG_LEN {
            return Err(PasetoError::AuthenticationFailed);
        }
        let (nonce, ciphertext) = body
            .split_first_chunk::<NONCE_LEN>()
            .ok_or(PasetoError::AuthenticationFailed)?;

        let aad = preauth_local(nonce, footer);
        cipher
            .decrypt(XNonce::from_slice(nonce), Payload { msg: ciphertext, aad: &aad })
            .map_err(|_| PasetoError::AuthenticationFailed)
    }
}

fn cipher(key: &SharedSecret) -> Result<XChaCha20Poly1305, PasetoError> {
    if key.len() != KEY_LEN {
        return Err(PasetoError::KeyResolution(format!(
            "v2.local requires a {KEY_LEN} byte shared secret, got {}",
            key.len()
        )));
    }
    XChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| PasetoError::KeyResolution("invalid XChaCha20-Poly1305 key".to_owned()))
}

/// Keyed `BLAKE2b(out = 24, key = seed, payload)`.
fn nonce(seed: &[u8], payload: &[u8]) -> Result<[u8; NONCE_LEN], PasetoError> {
    if seed.len() != <V2 as LocalVersion>::SEED_LEN {
        return Err(PasetoError::Configuration(format!(
            "v2.local nonce seed must be {} bytes, got {}",
            <V2 as LocalVersion>::SEED_LEN,
            seed.len()
        )));
    }
    let mut mac = <blake2::Blake2bMac<U24> as Mac>::new_from_slice(seed)
        .map_err(|_| PasetoError::Configuration("invalid nonce seed".to_owned()))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().into())
}

fn preauth_local(nonce: &[u8], footer: &[u8]) -> Vec<u8> {
    pae(&[<V2 as LocalVersion>::HEADER.as_bytes(), nonce, footer])
}
