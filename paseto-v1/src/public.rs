use core::fmt;

use digest::Digest;
use paseto_core::PasetoError;
use paseto_core::pae::{WriteBytes, pre_auth_encode};
use paseto_core::version::{PublicVersion, Version};
use rsa::pkcs8::LineEnding;
use rsa::pss::Signature;
use rsa::rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use zeroize::Zeroizing;

use crate::V1;

const MODULUS_BITS: usize = 2048;
const SIGNATURE_LEN: usize = MODULUS_BITS / 8;

/// An RSA-2048 private key that signs `v1.public.` tokens.
#[derive(Clone)]
pub struct SecretKey(rsa::pss::SigningKey<sha2::Sha384>);

/// An RSA-2048 public key that verifies `v1.public.` tokens.
#[derive(Clone)]
pub struct PublicKey(rsa::pss::VerifyingKey<sha2::Sha384>);

fn key_error(what: &str) -> PasetoError {
    PasetoError::KeyResolution(format!("could not parse {what}"))
}

fn check_modulus(key: &impl PublicKeyParts) -> Result<(), PasetoError> {
    let bits = key.n().bits();
    if bits != MODULUS_BITS {
        return Err(PasetoError::KeyResolution(format!(
            "v1.public requires a {MODULUS_BITS}-bit RSA key, got {bits} bits"
        )));
    }
    Ok(())
}

impl SecretKey {
    /// Generate a fresh RSA-2048 key pair. This is slow.
    pub fn generate() -> Result<Self, PasetoError> {
        rsa::pss::SigningKey::random(&mut OsRng, MODULUS_BITS)
            .map_err(|_| PasetoError::Configuration("RSA key generation failed".to_owned()))
            .map(Self)
    }

    pub fn from_rsa(key: rsa::RsaPrivateKey) -> Result<Self, PasetoError> {
        check_modulus(&key)?;
        Ok(Self(rsa::pss::SigningKey::new(key)))
    }

    /// Load a PKCS#1 or PKCS#8 DER encoded private key.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PasetoError> {
        use rsa::pkcs1::DecodeRsaPrivateKey;
        use rsa::pkcs8::DecodePrivateKey;

        let key = rsa::RsaPrivateKey::from_pkcs1_der(bytes)
            .or_else(|_| rsa::RsaPrivateKey::from_pkcs8_der(bytes))
            .map_err(|_| key_error("RSA private key DER"))?;
        Self::from_rsa(key)
    }

    /// Load a PKCS#1 (`RSA PRIVATE KEY`) or PKCS#8 (`PRIVATE KEY`) PEM encoded private key.
    pub fn from_pem(pem: &str) -> Result<Self, PasetoError> {
        use rsa::pkcs1::DecodeRsaPrivateKey;
        use rsa::pkcs8::DecodePrivateKey;

        let key = rsa::RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| rsa::RsaPrivateKey::from_pkcs8_pem(pem))
            .map_err(|_| key_error("RSA private key PEM"))?;
        Self::from_rsa(key)
    }

    pub fn to_pkcs8_pem(&self) -> Result<Zeroizing<String>, PasetoError> {
        use rsa::pkcs8::EncodePrivateKey;

        let key: &rsa::RsaPrivateKey = self.0.as_ref();
        key.to_pkcs8_pem(LineEnding::LF)
            .map_err(|_| PasetoError::Serialization("could not encode RSA private key".to_owned()))
    }

    pub fn public_key(&self) -> PublicKey {
        use rsa::signature::Keypair;

        PublicKey(self.0.verifying_key())
    }
}

impl PublicKey {
    pub fn from_rsa(key: rsa::RsaPublicKey) -> Result<Self, PasetoError> {
        check_modulus(&key)?;
        Ok(Self(rsa::pss::VerifyingKey::new(key)))
    }

    /// Load a DER encoded `SubjectPublicKeyInfo`.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PasetoError> {
        use rsa::pkcs8::DecodePublicKey;

        let key = rsa::RsaPublicKey::from_public_key_der(bytes)
            .map_err(|_| key_error("RSA public key DER"))?;
        Self::from_rsa(key)
    }

    /// Load a PEM encoded `SubjectPublicKeyInfo` (`PUBLIC KEY`).
    pub fn from_pem(pem: &str) -> Result<Self, PasetoError> {
        use rsa::pkcs8::DecodePublicKey;

        let key = rsa::RsaPublicKey::from_public_key_pem(pem)
            .map_err(|_| key_error("RSA public key PEM"))?;
        Self::from_rsa(key)
    }

    pub fn to_der(&self) -> Result<Vec<u8>, PasetoError> {
        use rsa::pkcs8::EncodePublicKey;

        self.0
            .to_public_key_der()
            .map(|doc| doc.into_vec())
            .map_err(|_| PasetoError::Serialization("could not encode RSA public key".to_owned()))
    }

    pub fn to_pem(&self) -> Result<String, PasetoError> {
        use rsa::pkcs8::EncodePublicKey;

        self.0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|_| PasetoError::Serialization("could not encode RSA public key".to_owned()))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        let a: &rsa::RsaPublicKey = self.0.as_ref();
        let b: &rsa::RsaPublicKey = other.0.as_ref();
        a == b
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("v1::SecretKey(RSA-2048)")
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("v1::PublicKey(RSA-2048)")
    }
}

impl PublicVersion for V1 {
    const VERSION: Version = Version::V1;
    const HEADER: &'static str = "v1.public.";
    const SIGNATURE_LEN: usize = SIGNATURE_LEN;

    type SecretKey = SecretKey;
    type PublicKey = PublicKey;

    fn sign(key: &SecretKey, message: &[u8], footer: &[u8]) -> Result<Vec<u8>, PasetoError> {
        use rsa::signature::RandomizedDigestSigner;

        let digest = preauth_public(message, footer);
        let signature: Box<[u8]> = key
            .0
            .try_sign_digest_with_rng(&mut OsRng, digest)
            .map_err(|_| PasetoError::Configuration("RSA signing failed".to_owned()))?
            .into();

        let mut out = Vec::with_capacity(message.len() + SIGNATURE_LEN);
        out.extend_from_slice(message);
        out.extend_from_slice(&signature);
        Ok(out)
    }

    fn verify<'a>(
        key: &PublicKey,
        body: &'a [u8],
        footer: &[u8],
    ) -> Result<&'a [u8], PasetoError> {
        use rsa::signature::DigestVerifier;

        let (message, tag) = body
            .split_last_chunk::<SIGNATURE_LEN>()
            .ok_or(PasetoError::AuthenticationFailed)?;

        let signature =
            Signature::try_from(&tag[..]).map_err(|_| PasetoError::AuthenticationFailed)?;
        let digest = preauth_public(message, footer);
        DigestVerifier::<sha2::Sha384, Signature>::verify_digest(&key.0, digest, &signature)
            .map_err(|_| PasetoError::AuthenticationFailed)?;

        Ok(message)
    }
}

fn preauth_public(message: &[u8], footer: &[u8]) -> sha2::Sha384 {
    struct Context(sha2::Sha384);
    impl WriteBytes for Context {
        fn write(&mut self, slice: &[u8]) {
            self.0.update(slice);
        }
    }

    let mut ctx = Context(sha2::Sha384::new());
    pre_auth_encode(
        &[<V1 as PublicVersion>::HEADER.as_bytes(), message, footer],
        &mut ctx,
    );
    ctx.0
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use paseto_core::PasetoError;
    use paseto_core::version::PublicVersion;

    use super::{PublicKey, SecretKey};
    use crate::V1;

    fn secret_key() -> &'static SecretKey {
        static KEY: OnceLock<SecretKey> = OnceLock::new();
        KEY.get_or_init(|| SecretKey::generate().unwrap())
    }

    #[test]
    fn sign_and_verify() {
        let key = secret_key();
        let body = V1::sign(key, br#"{"sub":"alice"}"#, b"kid").unwrap();
        assert_eq!(body.len(), 15 + 256);

        let message = V1::verify(&key.public_key(), &body, b"kid").unwrap();
        assert_eq!(message, br#"{"sub":"alice"}"#);
    }

    #[test]
    fn signatures_are_randomized() {
        let key = secret_key();
        let a = V1::sign(key, b"{}", b"").unwrap();
        let b = V1::sign(key, b"{}", b"").unwrap();
        assert_ne!(a, b);
        V1::verify(&key.public_key(), &a, b"").unwrap();
        V1::verify(&key.public_key(), &b, b"").unwrap();
    }

    #[test]
    fn tampering_is_detected() {
        let key = secret_key();
        let body = V1::sign(key, b"{}", b"footer").unwrap();

        let mut tampered = body.clone();
        tampered[0] ^= 1;
        assert!(matches!(
            V1::verify(&key.public_key(), &tampered, b"footer"),
            Err(PasetoError::AuthenticationFailed)
        ));

        let mut tampered = body.clone();
        *tampered.last_mut().unwrap() ^= 1;
        assert!(matches!(
            V1::verify(&key.public_key(), &tampered, b"footer"),
            Err(PasetoError::AuthenticationFailed)
        ));

        assert!(matches!(
            V1::verify(&key.public_key(), &body, b""),
            Err(PasetoError::AuthenticationFailed)
        ));

        assert!(matches!(
            V1::verify(&key.public_key(), &body[..255], b"footer"),
            Err(PasetoError::AuthenticationFailed)
        ));
    }

    #[test]
    fn pem_round_trip() {
        let key = secret_key();

        let pem = key.to_pkcs8_pem().unwrap();
        let loaded = SecretKey::from_pem(&pem).unwrap();
        assert_eq!(loaded.public_key(), key.public_key());

        let public_pem = key.public_key().to_pem().unwrap();
        assert_eq!(PublicKey::from_pem(&public_pem).unwrap(), key.public_key());

        let der = key.public_key().to_der().unwrap();
        assert_eq!(PublicKey::from_der(&der).unwrap(), key.public_key());
    }

    #[test]
    fn garbage_keys() {
        assert!(matches!(
            SecretKey::from_pem("not a key"),
            Err(PasetoError::KeyResolution(_))
        ));
        assert!(matches!(
            PublicKey::from_der(&[0; 32]),
            Err(PasetoError::KeyResolution(_))
        ));
    }

    #[test]
    fn only_2048_bit_keys() {
        let small = rsa::RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 1024).unwrap();
        assert!(matches!(
            PublicKey::from_rsa(small.to_public_key()),
            Err(PasetoError::KeyResolution(_))
        ));
        assert!(matches!(
            SecretKey::from_rsa(small),
            Err(PasetoError::KeyResolution(_))
        ));
    }

    #[test]
    fn debug_is_redacted() {
        assert_eq!(format!("{:?}", secret_key()), "v1::SecretKey(RSA-2048)");
    }
}
