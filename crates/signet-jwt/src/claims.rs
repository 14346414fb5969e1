//! The claim set: registered and custom claims with typed accessors.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Interpret a claim value as seconds since the UNIX epoch: a JSON number,
/// or a numeric-looking string. Anything else is absence — the validation
/// routines turn absence-with-a-value-present into a decode error.
pub(crate) fn parse_epoch_seconds(value: &Value) -> Option<DateTime<Utc>> {
    let seconds = if let Some(n) = value.as_f64() {
        n
    } else {
        value.as_str()?.parse::<f64>().ok()?
    };
    let secs = seconds.trunc() as i64;
    let nanos = (seconds.fract() * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// A mutable bag of claims, encoded as the token's payload segment.
///
/// Registered date claims are canonicalized at write time: the typed
/// setters store whole epoch seconds, so a round trip through the wire
/// yields the same numeric value. Arbitrary application claims are stored
/// as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-decoded JSON object as a claim set.
    pub fn from_claims(claims: Map<String, Value>) -> Self {
        ClaimSet { claims }
    }

    /// The backing map, in insertion order.
    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Set an arbitrary claim, stored as given.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.claims.insert(key.into(), value.into());
    }

    /// Set a claim to a calendar time, stored as whole epoch seconds.
    pub fn set_time(&mut self, key: impl Into<String>, time: DateTime<Utc>) {
        self.claims.insert(key.into(), Value::from(time.timestamp()));
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.claims.remove(key)
    }

    /// The "iss" claim, when present as a string.
    pub fn issuer(&self) -> Option<&str> {
        self.get("iss").and_then(Value::as_str)
    }

    pub fn set_issuer(&mut self, issuer: impl Into<String>) {
        self.set("iss", issuer.into());
    }

    /// The "aud" claim, when present as a single string. An audience array
    /// is only consulted during validation.
    pub fn audience(&self) -> Option<&str> {
        self.get("aud").and_then(Value::as_str)
    }

    pub fn set_audience(&mut self, audience: impl Into<String>) {
        self.set("aud", audience.into());
    }

    /// The "exp" claim as a calendar time.
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.get("exp").and_then(parse_epoch_seconds)
    }

    pub fn set_expiration(&mut self, time: DateTime<Utc>) {
        self.set_time("exp", time);
    }

    /// The "nbf" claim as a calendar time.
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.get("nbf").and_then(parse_epoch_seconds)
    }

    pub fn set_not_before(&mut self, time: DateTime<Utc>) {
        self.set_time("nbf", time);
    }

    /// The "iat" claim as a calendar time.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.get("iat").and_then(parse_epoch_seconds)
    }

    pub fn set_issued_at(&mut self, time: DateTime<Utc>) {
        self.set_time("iat", time);
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        ClaimSet::from_claims(claims)
    }
}

/// Chainable builder for [`ClaimSet`], used by the closure form of encode.
#[derive(Debug, Default)]
pub struct ClaimSetBuilder {
    claims: ClaimSet,
}

impl ClaimSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.claims.set_issuer(issuer);
        self
    }

    pub fn audience(&mut self, audience: impl Into<String>) -> &mut Self {
        self.claims.set_audience(audience);
        self
    }

    pub fn expiration(&mut self, time: DateTime<Utc>) -> &mut Self {
        self.claims.set_expiration(time);
        self
    }

    pub fn not_before(&mut self, time: DateTime<Utc>) -> &mut Self {
        self.claims.set_not_before(time);
        self
    }

    pub fn issued_at(&mut self, time: DateTime<Utc>) -> &mut Self {
        self.claims.set_issued_at(time);
        self
    }

    /// Set an arbitrary claim.
    pub fn claim(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.claims.set(key, value);
        self
    }

    pub fn build(self) -> ClaimSet {
        self.claims
    }
}
