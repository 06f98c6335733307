//! HMAC signing and verification (HS256, HS384, HS512)

use super::Algorithm;
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the raw HMAC of `message` with the hash selected by `algorithm`
pub fn sign(algorithm: Algorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::HS256 => mac::<HmacSha256>(key, message),
        Algorithm::HS384 => mac::<HmacSha384>(key, message),
        Algorithm::HS512 => mac::<HmacSha512>(key, message),
    }
}

/// Recompute the HMAC and compare it to `signature` in constant time
pub fn verify(algorithm: Algorithm, key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    let expected = sign(algorithm, key, message)?;

    if signature.len() != expected.len() {
        return Ok(false);
    }

    Ok(constant_time_eq(signature, &expected))
}

fn mac<M: Mac + hmac::digest::KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|e| Error::KeyInvalid(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
