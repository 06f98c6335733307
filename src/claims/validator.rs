use super::EXPIRATION_CLAIM;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Outcome of checking the `exp` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationCheck {
    /// No `exp` claim, or it lies in the present or future
    Valid,

    /// `exp` is strictly earlier than the current time
    Expired,

    /// `exp` is present but not an integer-valued timestamp
    Malformed,
}

impl ExpirationCheck {
    /// True only for [`ExpirationCheck::Valid`]
    pub fn is_valid(&self) -> bool {
        matches!(self, ExpirationCheck::Valid)
    }
}

/// Validates registered claims of a decoded payload
pub struct ClaimsValidator;

impl ClaimsValidator {
    /// Check the `exp` claim against the current wall-clock time
    pub fn validate_expiration(payload: &Value) -> ExpirationCheck {
        Self::validate_expiration_at(payload, current_timestamp())
    }

    /// Check the `exp` claim against `now` (seconds since the Unix epoch)
    ///
    /// Payloads that are not JSON objects carry no claims and are always valid.
    pub fn validate_expiration_at(payload: &Value, now: i64) -> ExpirationCheck {
        let Some(exp) = payload.get(EXPIRATION_CLAIM) else {
            return ExpirationCheck::Valid;
        };

        match parse_timestamp(exp) {
            None => ExpirationCheck::Malformed,
            Some(exp) if exp < now => ExpirationCheck::Expired,
            Some(_) => ExpirationCheck::Valid,
        }
    }
}

/// Interpret a claim value as whole seconds since the Unix epoch
///
/// Integers, floats without a fractional part and decimal strings are accepted.
fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Get current Unix timestamp
pub(crate) fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}
