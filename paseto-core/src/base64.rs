//! Unpadded base64url, the only encoding PASETO segments may use.
//!
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/01-Protocol-Versions/Common.md#base64-encoding>

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::PasetoError;

pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn encode_to(bytes: &[u8], out: &mut String) {
    URL_SAFE_NO_PAD.encode_string(bytes, out);
}

/// Rejects padding, the standard alphabet, and non-canonical trailing bits.
pub fn decode(s: &str) -> Result<Vec<u8>, PasetoError> {
    URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|_| PasetoError::MalformedEncoding)
}
