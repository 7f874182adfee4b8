use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::Mac;
use paseto_core::PasetoError;
use paseto_core::key::SharedSecret;
use paseto_core::pae::{WriteBytes, pre_auth_encode};
use paseto_core::version::{LocalVersion, Version};
use zeroize::Zeroizing;

use crate::V1;

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;
type HmacSha384 = hmac::Hmac<sha2::Sha384>;

const NONCE_LEN: usize = 32;
const TAG_LEN: usize = 48;
const MIN_KEY_LEN: usize = 32;

impl LocalVersion for V1 {
    const VERSION: Version = Version::V1;
    const HEADER: &'static str = "v1.local.";
    const SEED_LEN: usize = 32;

    fn dangerous_encrypt_with_seed(
        key: &SharedSecret,
        seed: &[u8],
        payload: &[u8],
        footer: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        let secret = check_key(key)?;
        let nonce = nonce(seed, payload)?;
        let (mut cipher, mut mac) = keys(secret, &nonce)?;

        let mut out = Vec::with_capacity(NONCE_LEN + payload.len() + TAG_LEN);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(payload);

        let ciphertext = &mut out[NONCE_LEN..];
        cipher.apply_keystream(ciphertext);
        preauth_local(&mut mac, &nonce, ciphertext, footer);

        out.extend_from_slice(&mac.finalize().into_bytes());
        Ok(out)
    }

    fn decrypt(key: &SharedSecret, body: &[u8], footer: &[u8]) -> Result<Vec<u8>, PasetoError> {
        let secret = check_key(key)?;

        let (nonce, rest) = body
            .split_first_chunk::<NONCE_LEN>()
            .ok_or(PasetoError::AuthenticationFailed)?;
        let (ciphertext, tag) = rest
            .split_last_chunk::<TAG_LEN>()
            .ok_or(PasetoError::AuthenticationFailed)?;

        let (mut cipher, mut mac) = keys(secret, nonce)?;
        preauth_local(&mut mac, nonce, ciphertext, footer);
        mac.verify_slice(tag)
            .map_err(|_| PasetoError::AuthenticationFailed)?;

        let mut plaintext = ciphertext.to_vec();
        cipher.apply_keystream(&mut plaintext);
        Ok(plaintext)
    }
}

fn check_key(key: &SharedSecret) -> Result<&[u8], PasetoError> {
    if key.len() < MIN_KEY_LEN {
        return Err(PasetoError::KeyResolution(format!(
            "v1.local requires a shared secret of at least {MIN_KEY_LEN} bytes, got {}",
            key.len()
        )));
    }
    Ok(key.as_bytes())
}

/// `HMAC-SHA384(key = seed, payload)` truncated to 32 bytes.
fn nonce(seed: &[u8], payload: &[u8]) -> Result<[u8; NONCE_LEN], PasetoError> {
    if seed.len() != <V1 as LocalVersion>::SEED_LEN {
        return Err(PasetoError::Configuration(format!(
            "v1.local nonce seed must be {} bytes, got {}",
            <V1 as LocalVersion>::SEED_LEN,
            seed.len()
        )));
    }
    let mut mac = HmacSha384::new_from_slice(seed)
        .map_err(|_| PasetoError::Configuration("invalid nonce seed".to_owned()))?;
    mac.update(payload);

    let mut nonce = [0; NONCE_LEN];
    nonce.copy_from_slice(&mac.finalize().into_bytes()[..NONCE_LEN]);
    Ok(nonce)
}

/// The first half of the nonce salts the KDF, the second half is the CTR IV.
fn keys(secret: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<(Aes256Ctr, HmacSha384), PasetoError> {
    let (salt, iv) = nonce.split_at(16);

    let ek = kdf(secret, b"paseto-encryption-key", salt)?;
    let ak = kdf(secret, b"paseto-auth-key-for-aead", salt)?;

    let cipher = Aes256Ctr::new_from_slices(&*ek, iv)
        .map_err(|_| PasetoError::Configuration("invalid AES-256-CTR key".to_owned()))?;
    let mac = HmacSha384::new_from_slice(&*ak)
        .map_err(|_| PasetoError::Configuration("invalid HMAC key".to_owned()))?;
    Ok((cipher, mac))
}

fn kdf(secret: &[u8], sep: &'static [u8], salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, PasetoError> {
    let mut output = Zeroizing::new([0; 32]);
    hkdf::Hkdf::<sha2::Sha384>::new(Some(salt), secret)
        .expand(sep, &mut *output)
        .map_err(|_| PasetoError::Configuration("HKDF output too long".to_owned()))?;
    Ok(output)
}

fn preauth_local(mac: &mut HmacSha384, nonce: &[u8], ciphertext: &[u8], footer: &[u8]) {
    struct Context<'a>(&'a mut HmacSha384);
    impl WriteBytes for Context<'_> {
        fn write(&mut self, slice: &[u8]) {
            self.0.update(slice);
        }
    }

    pre_auth_encode(
        &[
            <V1 as LocalVersion>::HEADER.as_bytes(),
            nonce,
            ciphertext,
            footer,
        ],
        Context(mac),
    );
}
