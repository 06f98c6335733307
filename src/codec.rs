//! Single entry point pairing an encoder and a decoder around one serializer

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::header::Header;
use crate::serializer::{JsonSerializer, SerdeJsonSerializer};
use crate::token::{Payload, TokenDecoder, TokenEncoder};
use serde::{Serialize, de::DeserializeOwned};

/// Encodes and decodes tokens through a shared [`JsonSerializer`]
///
/// ```
/// use jwtcodec::{Algorithm, JsonWebToken};
/// use serde_json::json;
///
/// let jwt = JsonWebToken::new();
/// let token = jwt.encode(&json!({"sub": "user123"}), "secret", Algorithm::HS256)?;
/// let payload = jwt.decode_to_map(&token, "secret", true)?;
/// assert_eq!(payload["sub"], "user123");
/// # Ok::<(), jwtcodec::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonWebToken<S = SerdeJsonSerializer> {
    serializer: S,
}

impl JsonWebToken {
    /// Create a codec backed by `serde_json`
    pub fn new() -> Self {
        Self::with_serializer(SerdeJsonSerializer)
    }
}

impl<S: JsonSerializer> JsonWebToken<S> {
    /// Create a codec that routes all JSON through `serializer`
    pub fn with_serializer(serializer: S) -> Self {
        Self { serializer }
    }

    /// Borrow an encoder over this codec's serializer
    pub fn encoder(&self) -> TokenEncoder<&S> {
        TokenEncoder::with_serializer(&self.serializer)
    }

    /// Borrow a decoder over this codec's serializer
    pub fn decoder(&self) -> TokenDecoder<&S> {
        TokenDecoder::with_serializer(&self.serializer)
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
        self.encoder().encode(payload, key, algorithm)
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
        self.encoder()
            .encode_with_headers(extra_headers, payload, key, algorithm)
    }

    /// Decode the payload as a JSON string, verifying when `verify_signature` is set
    pub fn decode(
        &self,
        token: &str,
        key: impl AsRef<[u8]>,
        verify_signature: bool,
    ) -> Result<String> {
        self.decoder().decode(token, key, verify_signature)
    }

    /// Decode the payload into a JSON object
    pub fn decode_to_map(
        &self,
        token: &str,
        key: impl AsRef<[u8]>,
        verify_signature: bool,
    ) -> Result<Payload> {
        self.decoder().decode_to_map(token, key, verify_signature)
    }

    /// Decode the payload into `T`
    pub fn decode_to<T>(
        &self,
        token: &str,
        key: impl AsRef<[u8]>,
        verify_signature: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.decoder().decode_to(token, key, verify_signature)
    }

    /// Decode the header without verifying the signature
    pub fn decode_header(&self, token: &str) -> Result<Header> {
        self.decoder().decode_header(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde::Deserialize;
    use std::cell::Cell;

    /// Counts calls while delegating to serde_json
    #[derive(Default)]
    struct CountingSerializer {
        serialized: Cell<usize>,
        deserialized: Cell<usize>,
    }

    impl JsonSerializer for CountingSerializer {
        fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
            self.serialized.set(self.serialized.get() + 1);
            SerdeJsonSerializer.serialize(value)
        }

        fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<T> {
            self.deserialized.set(self.deserialized.get() + 1);
            SerdeJsonSerializer.deserialize(json)
        }
    }

    /// Serializer that fails every call with a non-deserialization error
    struct BrokenSerializer;

    impl JsonSerializer for BrokenSerializer {
        fn serialize<T: Serialize + ?Sized>(&self, _value: &T) -> Result<String> {
            Err(Error::Serialization("backend offline".into()))
        }

        fn deserialize<T: DeserializeOwned>(&self, _json: &str) -> Result<T> {
            Err(Error::Serialization("backend offline".into()))
        }
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Session {
        user: String,
        admin: bool,
    }

    #[test]
    fn test_injected_serializer_is_used() {
        let jwt = JsonWebToken::with_serializer(CountingSerializer::default());
        let session = Session {
            user: "bob".into(),
            admin: false,
        };

        let token = jwt.encode(&session, "k", Algorithm::HS256).unwrap();
        assert_eq!(jwt.serializer.serialized.get(), 2);

        let decoded: Session = jwt.decode_to(&token, "k", true).unwrap();
        assert_eq!(decoded, session);
        // header, payload claims check, typed payload
        assert_eq!(jwt.serializer.deserialized.get(), 3);
    }

    #[test]
    fn test_serializer_errors_propagate_on_encode() {
        let jwt = JsonWebToken::with_serializer(BrokenSerializer);
        assert!(matches!(
            jwt.encode(&1, "k", Algorithm::HS256),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_round_trip_all_algorithms() {
        let jwt = JsonWebToken::new();
        let session = Session {
            user: "alice".into(),
            admin: true,
        };
        for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let token = jwt.encode(&session, "secret", alg).unwrap();
            assert_eq!(
                jwt.decode(&token, "secret", false).unwrap(),
                r#"{"user":"alice","admin":true}"#
            );
            let decoded: Session = jwt.decode_to(&token, "secret", true).unwrap();
            assert_eq!(decoded, session);
        }
    }
}
