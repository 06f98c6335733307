//! JOSE header construction and inspection

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Ordered header mapping (keys keep insertion order)
pub type Header = Map<String, Value>;

/// Token type recorded in every header
pub const TOKEN_TYPE: &str = "JWT";

pub(crate) const TYPE_KEY: &str = "typ";
pub(crate) const ALGORITHM_KEY: &str = "alg";

/// Build the header for `algorithm`
///
/// Extra entries come first in caller order, followed by `typ` and `alg`.
/// Extra entries named `typ` or `alg` are dropped.
pub fn build(extra_headers: Option<&Header>, algorithm: Algorithm) -> Header {
    let mut header = Header::new();

    if let Some(extra) = extra_headers {
        for (name, value) in extra {
            if name == TYPE_KEY || name == ALGORITHM_KEY {
                continue;
            }
            header.insert(name.clone(), value.clone());
        }
    }

    header.insert(TYPE_KEY.to_string(), Value::String(TOKEN_TYPE.to_string()));
    header.insert(
        ALGORITHM_KEY.to_string(),
        Value::String(algorithm.as_str().to_string()),
    );
    header
}

/// Read the `alg` entry of a decoded header
pub fn algorithm_name(header: &Header) -> Result<&str> {
    header
        .get(ALGORITHM_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::FormatInvalidJson("header has no string 'alg' entry".to_string()))
}
