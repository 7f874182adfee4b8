//! Post-decode claim validation.
//!
//! Validation only ever runs on claims that came out of an authenticated token.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;

use crate::claims::{self, ClaimValue, Claims};
use crate::{ClaimError, PasetoError};

pub trait Validate {
    /// The type of claim that can be validated
    type Claims: ?Sized;

    /// The validation to perform on the claims
    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError>;

    /// Extend the validation with another validation.
    fn then<V>(self, other: V) -> impl Validate<Claims = Self::Claims>
    where
        Self: Sized,
        V: Validate<Claims = Self::Claims>,
    {
        ValidateThen(self, other)
    }
}

struct ValidateThen<T, U>(T, U);

impl<T: Validate, U: Validate<Claims = T::Claims>> Validate for ValidateThen<T, U> {
    type Claims = T::Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        self.0.validate(claims)?;
        self.1.validate(claims)
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    type Claims = T::Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        T::validate(self, claims)
    }
}

/// Where "now" comes from.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        C::now(self)
    }
}

/// Checks `exp` and `nbf` against a point in time, with optional leeway for clock skew.
///
/// A token is expired once `now - skew` is after `exp`, and premature while
/// `now + skew` is before `nbf`. Tokens without these claims always pass.
#[derive(Clone, Copy, Debug)]
pub struct TimeWindow {
    now: Timestamp,
    skew: Duration,
}

impl TimeWindow {
    pub fn valid_now() -> Self {
        Self::valid_at(Timestamp::now())
    }

    pub fn valid_at(now: Timestamp) -> Self {
        Self {
            now,
            skew: Duration::ZERO,
        }
    }

    pub fn with_leeway(self, skew: Duration) -> Self {
        Self { skew, ..self }
    }
}

impl Validate for TimeWindow {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        if let Some(exp) = claims.expiration()? {
            let earliest = self.now.checked_sub(self.skew).unwrap_or(Timestamp::MIN);
            if earliest > exp {
                return Err(ClaimError::Expired {
                    claim: claims::EXPIRATION.to_owned(),
                    description: format!(
                        "paseto expired at {}. Current time: {}, a difference of {} milliseconds. Allowed clock skew: {} milliseconds.",
                        claims::format_timestamp(exp),
                        claims::format_timestamp(self.now),
                        difference_millis(exp, self.now),
                        self.skew.as_millis(),
                    ),
                }
                .into());
            }
        }

        if let Some(nbf) = claims.not_before()? {
            let latest = self.now.checked_add(self.skew).unwrap_or(Timestamp::MAX);
            if latest < nbf {
                return Err(ClaimError::Premature {
                    claim: claims::NOT_BEFORE.to_owned(),
                    description: format!(
                        "paseto before not before date: {}. Current time: {}, a difference of {} milliseconds. Allowed clock skew: {} milliseconds.",
                        claims::format_timestamp(nbf),
                        claims::format_timestamp(self.now),
                        difference_millis(self.now, nbf),
                        self.skew.as_millis(),
                    ),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn difference_millis(earlier: Timestamp, later: Timestamp) -> i64 {
    later.as_millisecond().saturating_sub(earlier.as_millisecond())
}

/// A described test over a single claim value.
#[derive(Clone)]
pub struct ClaimPredicate {
    description: String,
    test: Arc<dyn Fn(&ClaimValue) -> bool + Send + Sync>,
}

impl ClaimPredicate {
    pub fn new(
        description: impl Into<String>,
        test: impl Fn(&ClaimValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            test: Arc::new(test),
        }
    }

    /// Equality. Timestamps compare by instant, whatever representation the claim uses.
    pub fn equal_to(expected: impl Into<ClaimValue>) -> Self {
        let expected = expected.into();
        let description = format!("equal to: '{expected}'");
        match expected {
            ClaimValue::Timestamp(ts) => Self::new(description, move |actual| {
                actual.to_timestamp().is_ok_and(|actual| actual == ts)
            }),
            expected => Self::new(description, move |actual| *actual == expected),
        }
    }

    /// Any non-null value.
    pub fn present() -> Self {
        Self::new("present", |actual| !actual.is_null())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn test(&self, value: &ClaimValue) -> bool {
        (self.test)(value)
    }
}

impl fmt::Debug for ClaimPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimPredicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Named predicates that must all hold. Registering a name twice replaces the
/// earlier predicate.
#[derive(Clone, Debug, Default)]
pub struct RequiredClaims {
    predicates: BTreeMap<String, ClaimPredicate>,
}

impl RequiredClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, predicate: ClaimPredicate) {
        self.predicates.insert(name.into(), predicate);
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Validate for RequiredClaims {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        for (name, predicate) in &self.predicates {
            match claims.get(name) {
                None | Some(ClaimValue::Null) => {
                    return Err(ClaimError::MissingClaim {
                        claim: name.clone(),
                        description: predicate.description.clone(),
                    }
                    .into());
                }
                Some(value) if !predicate.test(value) => {
                    return Err(ClaimError::IncorrectClaim {
                        claim: name.clone(),
                        description: predicate.description.clone(),
                        actual: value.to_string(),
                    }
                    .into());
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
