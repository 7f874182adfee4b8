//! The claim value model.
//!
//! Claims are a string keyed map of [`ClaimValue`]s. Seven claim names are
//! registered and have typed accessors on [`Claims`].

use std::collections::BTreeMap;
use std::fmt;

use jiff::Timestamp;

use crate::PasetoError;

/// Paseto `Issuer` claim name.
pub const ISSUER: &str = "iss";
/// Paseto `Subject` claim name.
pub const SUBJECT: &str = "sub";
/// Paseto `Audience` claim name.
pub const AUDIENCE: &str = "aud";
/// Paseto `Expiration` claim name.
pub const EXPIRATION: &str = "exp";
/// Paseto `Not Before` claim name.
pub const NOT_BEFORE: &str = "nbf";
/// Paseto `Issued At` claim name.
pub const ISSUED_AT: &str = "iat";
/// Paseto `Token ID` claim name.
pub const TOKEN_ID: &str = "jti";
/// Registered footer claim: `Key ID`.
pub const KEY_ID: &str = "kid";

/// Claims whose value is a point in time.
fn is_registered_date(name: &str) -> bool {
    matches!(name, EXPIRATION | NOT_BEFORE | ISSUED_AT)
}

/// A single claim value.
#[derive(Clone, Debug, PartialEq)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(Timestamp),
    Array(Vec<ClaimValue>),
    Object(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ClaimValue::Float(f) => Some(*f),
            ClaimValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ClaimValue]> {
        match self {
            ClaimValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, ClaimValue>> {
        match self {
            ClaimValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ClaimValue::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ClaimValue::Null => "null",
            ClaimValue::Bool(_) => "bool",
            ClaimValue::Integer(_) => "integer",
            ClaimValue::Float(_) => "float",
            ClaimValue::String(_) => "string",
            ClaimValue::Timestamp(_) => "timestamp",
            ClaimValue::Array(_) => "array",
            ClaimValue::Object(_) => "object",
        }
    }

    /// Coerce to a timestamp. Numbers and numeric strings are seconds since the
    /// unix epoch; other strings must be RFC 3339 / ISO-8601 with an offset.
    pub fn to_timestamp(&self) -> Result<Timestamp, PasetoError> {
        match self {
            ClaimValue::Timestamp(ts) => Ok(*ts),
            ClaimValue::Integer(secs) => from_seconds(*secs),
            ClaimValue::Float(secs) if secs.is_finite() => from_seconds(secs.trunc() as i64),
            ClaimValue::String(s) => match s.parse::<i64>() {
                Ok(secs) => from_seconds(secs),
                Err(_) => parse_timestamp(s),
            },
            other => Err(conversion_error(other, "timestamp")),
        }
    }
}

fn from_seconds(secs: i64) -> Result<Timestamp, PasetoError> {
    Timestamp::from_second(secs)
        .map_err(|e| PasetoError::Serialization(format!("epoch seconds {secs} out of range: {e}")))
}

fn conversion_error(value: &ClaimValue, wanted: &str) -> PasetoError {
    PasetoError::Serialization(format!(
        "cannot convert claim value of type '{}' to '{wanted}'",
        value.type_name()
    ))
}

/// Parse an ISO-8601 date-time with an offset, e.g. `2019-01-01T00:00:00+00:00`.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, PasetoError> {
    s.parse::<Timestamp>().map_err(|_| {
        PasetoError::Serialization(format!("value does not appear to be ISO-8601-formatted: {s}"))
    })
}

/// Format a timestamp the way tokens carry it: RFC 3339 with a `+00:00` offset.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.display_with_offset(jiff::tz::Offset::UTC).to_string()
}

impl fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimValue::Null => f.write_str("null"),
            ClaimValue::Bool(b) => write!(f, "{b}"),
            ClaimValue::Integer(i) => write!(f, "{i}"),
            ClaimValue::Float(x) => write!(f, "{x}"),
            ClaimValue::String(s) => f.write_str(s),
            ClaimValue::Timestamp(ts) => f.write_str(&format_timestamp(*ts)),
            ClaimValue::Array(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            ClaimValue::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(s: &str) -> Self {
        ClaimValue::String(s.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(s: String) -> Self {
        ClaimValue::String(s)
    }
}

impl From<bool> for ClaimValue {
    fn from(b: bool) -> Self {
        ClaimValue::Bool(b)
    }
}

impl From<i32> for ClaimValue {
    fn from(i: i32) -> Self {
        ClaimValue::Integer(i.into())
    }
}

impl From<i64> for ClaimValue {
    fn from(i: i64) -> Self {
        ClaimValue::Integer(i)
    }
}

impl From<u32> for ClaimValue {
    fn from(i: u32) -> Self {
        ClaimValue::Integer(i.into())
    }
}

impl From<f64> for ClaimValue {
    fn from(x: f64) -> Self {
        ClaimValue::Float(x)
    }
}

impl From<Timestamp> for ClaimValue {
    fn from(ts: Timestamp) -> Self {
        ClaimValue::Timestamp(ts)
    }
}

impl<T: Into<ClaimValue>> From<Vec<T>> for ClaimValue {
    fn from(values: Vec<T>) -> Self {
        ClaimValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ClaimValue>> for ClaimValue {
    fn from(map: BTreeMap<String, ClaimValue>) -> Self {
        ClaimValue::Object(map)
    }
}

impl<T: Into<ClaimValue>> From<Option<T>> for ClaimValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ClaimValue::Null, Into::into)
    }
}

/// A token body: claim names mapped to values.
///
/// Registered date claims (`exp`, `nbf`, `iat`) given as ISO-8601 strings are
/// stored as [`ClaimValue::Timestamp`], so they compare equal after a round trip.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Claims {
    claims: BTreeMap<String, ClaimValue>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already decoded map, normalizing registered date claims.
    pub fn from_map(map: BTreeMap<String, ClaimValue>) -> Self {
        let mut claims = Self::new();
        for (name, value) in map {
            claims.insert(name, value);
        }
        claims
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ClaimValue>) {
        let name = name.into();
        let mut value = value.into();
        if is_registered_date(&name)
            && let ClaimValue::String(s) = &value
            && let Ok(ts) = parse_timestamp(s)
        {
            value = ClaimValue::Timestamp(ts);
        }
        self.claims.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    /// Whether the claim is present with a non-null value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn as_map(&self) -> &BTreeMap<String, ClaimValue> {
        &self.claims
    }

    pub fn into_map(self) -> BTreeMap<String, ClaimValue> {
        self.claims
    }

    /// A string claim. Absent and `null` claims are `None`; other types are an error.
    pub fn get_str(&self, name: &str) -> Result<Option<&str>, PasetoError> {
        match self.get(name) {
            None | Some(ClaimValue::Null) => Ok(None),
            Some(ClaimValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(conversion_error(other, "string")),
        }
    }

    pub fn get_i64(&self, name: &str) -> Result<Option<i64>, PasetoError> {
        match self.get(name) {
            None | Some(ClaimValue::Null) => Ok(None),
            Some(ClaimValue::Integer(i)) => Ok(Some(*i)),
            Some(other) => Err(conversion_error(other, "integer")),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, PasetoError> {
        match self.get(name) {
            None | Some(ClaimValue::Null) => Ok(None),
            Some(ClaimValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(conversion_error(other, "bool")),
        }
    }

    /// A claim coerced to a timestamp, numbers read as epoch seconds.
    pub fn get_timestamp(&self, name: &str) -> Result<Option<Timestamp>, PasetoError> {
        match self.get(name) {
            None | Some(ClaimValue::Null) => Ok(None),
            Some(value) => value.to_timestamp().map(Some),
        }
    }

    /// Compatibility accessor for producers that wrote epoch *milliseconds*.
    ///
    /// PASETO and JWT both define numeric dates in seconds, which is what every
    /// other accessor assumes. Only integers are read differently here.
    pub fn get_timestamp_millis(&self, name: &str) -> Result<Option<Timestamp>, PasetoError> {
        match self.get(name) {
            Some(ClaimValue::Integer(millis)) => Timestamp::from_millisecond(*millis)
                .map(Some)
                .map_err(|e| {
                    PasetoError::Serialization(format!(
                        "epoch milliseconds {millis} out of range: {e}"
                    ))
                }),
            _ => self.get_timestamp(name),
        }
    }

    pub fn issuer(&self) -> Result<Option<&str>, PasetoError> {
        self.get_str(ISSUER)
    }

    pub fn subject(&self) -> Result<Option<&str>, PasetoError> {
        self.get_str(SUBJECT)
    }

    pub fn audience(&self) -> Result<Option<&str>, PasetoError> {
        self.get_str(AUDIENCE)
    }

    pub fn expiration(&self) -> Result<Option<Timestamp>, PasetoError> {
        self.get_timestamp(EXPIRATION)
    }

    pub fn not_before(&self) -> Result<Option<Timestamp>, PasetoError> {
        self.get_timestamp(NOT_BEFORE)
    }

    pub fn issued_at(&self) -> Result<Option<Timestamp>, PasetoError> {
        self.get_timestamp(ISSUED_AT)
    }

    pub fn token_id(&self) -> Result<Option<&str>, PasetoError> {
        self.get_str(TOKEN_ID)
    }
}

impl<K: Into<String>, V: Into<ClaimValue>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut claims = Claims::new();
        for (k, v) in iter {
            claims.insert(k, v);
        }
        claims
    }
}
