use super::SEGMENT_SEPARATOR;
use crate::algorithm::{Algorithm, hmac};
use crate::claims::{ClaimsValidator, ExpirationCheck};
use crate::error::{Error, Result};
use crate::header::{self, Header};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::serializer::{JsonSerializer, SerdeJsonSerializer};
use crate::utils::base64url;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Generic decoded payload (keys keep token order)
pub type Payload = Map<String, Value>;

/// Splits, decodes and optionally verifies compact tokens
#[derive(Debug, Clone, Default)]
pub struct TokenDecoder<S = SerdeJsonSerializer> {
    serializer: S,
}

/// The three raw segments of a token
struct Segments<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> Segments<'a> {
    fn split(token: &'a str) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split(SEGMENT_SEPARATOR);
        let header = parts.next().ok_or(Error::FormatInvalid)?;
        let payload = parts.next().ok_or(Error::FormatInvalid)?;
        let signature = parts.next().ok_or(Error::FormatInvalid)?;
        if parts.next().is_some() {
            return Err(Error::FormatInvalid);
        }
        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(Error::FormatInvalid);
        }

        tracing::trace!(
            header_len = header.len(),
            payload_len = payload.len(),
            signature_len = signature.len(),
            "split token"
        );

        Ok(Self {
            header,
            payload,
            signature,
        })
    }

    /// `header.payload`, the bytes covered by the signature
    fn signing_input(&self, token: &'a str) -> &'a str {
        &token[..self.header.len() + 1 + self.payload.len()]
    }
}

impl TokenDecoder {
    /// Create a decoder backed by `serde_json`
    pub fn new() -> Self {
        Self::with_serializer(SerdeJsonSerializer)
    }
}

impl<S: JsonSerializer> TokenDecoder<S> {
    /// Create a decoder that deserializes through `serializer`
    pub fn with_serializer(serializer: S) -> Self {
        Self { serializer }
    }

    /// Decode `token` and return the payload JSON text
    ///
    /// With `verify_signature` set, the signature is checked against `key`
    /// and the `exp` claim against the current time. Any failure of either
    /// check is reported as [`Error::SignatureInvalid`]. Without it, neither
    /// the key nor the algorithm is looked at.
    pub fn decode(
        &self,
        token: &str,
        key: impl AsRef<[u8]>,
        verify_signature: bool,
    ) -> Result<String> {
        let segments = Segments::split(token)?;

        let header_json = base64url::decode_string(segments.header, MAX_DECODED_HEADER_SIZE)?;
        let payload_json = base64url::decode_string(segments.payload, MAX_DECODED_PAYLOAD_SIZE)?;

        let header = self.parse_header(&header_json)?;

        if !verify_signature {
            return Ok(payload_json);
        }

        let algorithm = Algorithm::from_str(header::algorithm_name(&header)?)?;
        // Signature text that is not canonical Base64URL cannot match
        let Ok(signature) =
            base64url::decode_bytes(segments.signature, MAX_DECODED_SIGNATURE_SIZE)
        else {
            tracing::debug!(
                algorithm = %algorithm,
                reason = "undecodable signature",
                "token rejected"
            );
            return Err(Error::SignatureInvalid);
        };

        let signing_input = segments.signing_input(token);
        if !hmac::verify(algorithm, key.as_ref(), signing_input.as_bytes(), &signature)? {
            tracing::debug!(
                algorithm = %algorithm,
                reason = "signature mismatch",
                "token rejected"
            );
            return Err(Error::SignatureInvalid);
        }

        let payload: Value = self
            .serializer
            .deserialize(&payload_json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse payload: {e}")))?;

        match ClaimsValidator::validate_expiration(&payload) {
            ExpirationCheck::Valid => Ok(payload_json),
            ExpirationCheck::Expired => {
                tracing::debug!(algorithm = %algorithm, reason = "expired", "token rejected");
                Err(Error::SignatureInvalid)
            }
            ExpirationCheck::Malformed => {
                tracing::debug!(algorithm = %algorithm, reason = "malformed exp", "token rejected");
                Err(Error::SignatureInvalid)
            }
        }
    }

    /// Decode `token` into a generic key/value payload
    pub fn decode_to_map(
        &self,
        token: &str,
        key: impl AsRef<[u8]>,
        verify_signature: bool,
    ) -> Result<Payload> {
        self.decode_to(token, key, verify_signature)
    }

    /// Decode `token` and deserialize the payload into `T`
    pub fn decode_to<T>(
        &self,
        token: &str,
        key: impl AsRef<[u8]>,
        verify_signature: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let payload_json = self.decode(token, key, verify_signature)?;
        self.serializer
            .deserialize(&payload_json)
            .map_err(|e| match e {
                Error::Deserialization(_) => e,
                other => Error::Deserialization(other.to_string()),
            })
    }

    /// Decode the header of `token` without verifying anything
    pub fn decode_header(&self, token: &str) -> Result<Header> {
        let segments = Segments::split(token)?;
        let header_json = base64url::decode_string(segments.header, MAX_DECODED_HEADER_SIZE)?;
        self.parse_header(&header_json)
    }

    fn parse_header(&self, header_json: &str) -> Result<Header> {
        self.serializer
            .deserialize(header_json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse header: {e}")))
    }
}
