use super::SEGMENT_SEPARATOR;
use crate::algorithm::{Algorithm, hmac};
use crate::error::{Error, Result};
use crate::header::{self, Header};
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_TOKEN_LENGTH};
use crate::serializer::{JsonSerializer, SerdeJsonSerializer};
use crate::utils::base64url;
use serde::Serialize;

/// Produces signed compact tokens
///
/// Encoding is deterministic: the same payload, key, algorithm and extra
/// headers always yield the same token for a given serializer.
///
/// Tokens the decoder would refuse are never produced: a token longer than
/// 64KB fails with [`Error::TokenTooLarge`], and a header JSON longer than
/// 8KB fails with [`Error::HeaderTooLarge`].
#[derive(Debug, Clone, Default)]
pub struct TokenEncoder<S = SerdeJsonSerializer> {
    serializer: S,
}

impl TokenEncoder {
    /// Create an encoder backed by `serde_json`
    pub fn new() -> Self {
        Self::with_serializer(SerdeJsonSerializer)
    }
}

impl<S: JsonSerializer> TokenEncoder<S> {
    /// Create an encoder that serializes through `serializer`
    pub fn with_serializer(serializer: S) -> Self {
        Self { serializer }
    }

    /// Encode `payload` with the standard `typ`/`alg` header
    pub fn encode<P>(
        &self,
        payload: &P,
        key: impl AsRef<[u8]>,
        algorithm: Algorithm,
    ) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        self.encode_inner(None, payload, key.as_ref(), algorithm)
    }

    /// Encode `payload` with `extra_headers` placed ahead of `typ`/`alg`
    pub fn encode_with_headers<P>(
        &self,
        extra_headers: &Header,
        payload: &P,
        key: impl AsRef<[u8]>,
        algorithm: Algorithm,
    ) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        self.encode_inner(Some(extra_headers), payload, key.as_ref(), algorithm)
    }

    fn encode_inner<P>(
        &self,
        extra_headers: Option<&Header>,
        payload: &P,
        key: &[u8],
        algorithm: Algorithm,
    ) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        let header = header::build(extra_headers, algorithm);

        let header_json = self.serializer.serialize(&header)?;
        if header_json.len() > MAX_DECODED_HEADER_SIZE {
            return Err(Error::HeaderTooLarge {
                size: header_json.len(),
                max: MAX_DECODED_HEADER_SIZE,
            });
        }
        let payload_json = self.serializer.serialize(payload)?;

        let header_b64 = base64url::encode(&header_json);
        let payload_b64 = base64url::encode(&payload_json);

        let signature_b64_len = (algorithm.signature_len() * 4).div_ceil(3);
        let token_len = header_b64.len() + payload_b64.len() + signature_b64_len + 2;
        if token_len > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token_len,
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut token = String::with_capacity(token_len);
        token.push_str(&header_b64);
        token.push(SEGMENT_SEPARATOR);
        token.push_str(&payload_b64);

        let signature = hmac::sign(algorithm, key, token.as_bytes())?;
        token.push(SEGMENT_SEPARATOR);
        token.push_str(&base64url::encode_bytes(&signature));

        tracing::debug!(
            algorithm = %algorithm,
            header_entries = header.len(),
            token_len = token.len(),
            "encoded token"
        );

        Ok(token)
    }
}
