//! The compact token string.
//!
//! ```text
//! version.purpose.base64url(body)[.base64url(footer)]
//! ```
//!
//! [`SealedToken`] is only the wire shape. Nothing in it has been authenticated.

use core::fmt;
use core::str::FromStr;

use crate::PasetoError;
use crate::version::{self, Purpose, Version};

/// A token as it travels: header, sealed body and raw footer bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedToken {
    version: Version,
    purpose: Purpose,
    payload: Vec<u8>,
    footer: Vec<u8>,
}

impl SealedToken {
    pub fn new(version: Version, purpose: Purpose, payload: Vec<u8>, footer: Vec<u8>) -> Self {
        Self {
            version,
            purpose,
            payload,
            footer,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// `"vN.purpose."`
    pub fn header(&self) -> &'static str {
        version::header(self.version, self.purpose)
    }

    /// The sealed body: nonce, ciphertext and tag, or message and signature.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// View the **unverified** footer bytes for this token.
    pub fn unverified_footer(&self) -> &[u8] {
        &self.footer
    }
}

impl fmt::Display for SealedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(
            self.header().len() + (self.payload.len() + self.footer.len()) * 4 / 3 + 4,
        );
        out.push_str(self.header());
        crate::base64::encode_to(&self.payload, &mut out);

        if !self.footer.is_empty() {
            out.push('.');
            crate::base64::encode_to(&self.footer, &mut out);
        }

        f.write_str(&out)
    }
}

impl FromStr for SealedToken {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        let (version, purpose, payload, footer) = match segments[..] {
            [v, p, payload] => (v, p, payload, None),
            [v, p, payload, footer] => (v, p, payload, Some(footer)),
            _ => {
                return Err(PasetoError::MalformedToken(
                    "expected 3 or 4 dot separated segments",
                ));
            }
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PasetoError::MalformedToken("empty segment"));
        }

        let (version, purpose) = parse_header(version, purpose)?;

        let payload = crate::base64::decode(payload)?;
        let footer = footer
            .map(crate::base64::decode)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            version,
            purpose,
            payload,
            footer,
        })
    }
}

/// A well formed header for a version this library does not implement (`v3`,
/// `v4`, ...) is reported as unsupported rather than malformed.
fn parse_header(version: &str, purpose: &str) -> Result<(Version, Purpose), PasetoError> {
    let parsed_purpose = purpose.parse::<Purpose>();
    match version.parse::<Version>() {
        Ok(v) => Ok((v, parsed_purpose?)),
        Err(err) => {
            let looks_like_version = version
                .strip_prefix('v')
                .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
            if looks_like_version && parsed_purpose.is_ok() {
                Err(PasetoError::UnsupportedToken {
                    version: version.to_owned(),
                    purpose: purpose.to_owned(),
                })
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_empty_footer() {
        let token = SealedToken::new(Version::V2, Purpose::Public, vec![0xfb, 0xff], vec![]);
        assert_eq!(token.to_string(), "v2.public.-_8");

        let token = SealedToken::new(Version::V1, Purpose::Local, vec![0xfb, 0xff], b"abc".to_vec());
        assert_eq!(token.to_string(), "v1.local.-_8.YWJj");
    }

    #[test]
    fn parse() {
        let token: SealedToken = "v1.local.-_8.YWJj".parse().unwrap();
        assert_eq!(token.version(), Version::V1);
        assert_eq!(token.purpose(), Purpose::Local);
        assert_eq!(token.payload(), [0xfb, 0xff]);
        assert_eq!(token.unverified_footer(), b"abc");
        assert_eq!(token.to_string(), "v1.local.-_8.YWJj");
    }

    #[test]
    fn segment_count() {
        for s in ["", "v2", "v2.local", "v2.local.YWJj.YWJj.YWJj"] {
            assert!(
                matches!(s.parse::<SealedToken>(), Err(PasetoError::MalformedToken(_))),
                "{s:?}"
            );
        }
    }

    #[test]
    fn empty_segments() {
        for s in ["v2.local.", "v2.local.YWJj.", "v2..YWJj", ".local.YWJj"] {
            assert!(
                matches!(s.parse::<SealedToken>(), Err(PasetoError::MalformedToken(_))),
                "{s:?}"
            );
        }
    }

    #[test]
    fn bad_base64() {
        assert!(matches!(
            "v2.local.YW=J".parse::<SealedToken>(),
            Err(PasetoError::MalformedEncoding)
        ));
        assert!(matches!(
            "v2.local.YWJj.a".parse::<SealedToken>(),
            Err(PasetoError::MalformedEncoding)
        ));
    }

    #[test]
    fn unknown_headers() {
        assert!(matches!(
            "v4.local.YWJj".parse::<SealedToken>(),
            Err(PasetoError::UnsupportedToken { version, purpose })
                if version == "v4" && purpose == "local"
        ));
        assert!(matches!(
            "v2.secret.YWJj".parse::<SealedToken>(),
            Err(PasetoError::MalformedToken(_))
        ));
        assert!(matches!(
            "vx.local.YWJj".parse::<SealedToken>(),
            Err(PasetoError::MalformedToken(_))
        ));
        assert!(matches!(
            "V2.local.YWJj".parse::<SealedToken>(),
            Err(PasetoError::MalformedToken(_))
        ));
    }
}
