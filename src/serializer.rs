//! JSON serialization collaborator
//!
//! The codec never calls a JSON library directly. Encoders and decoders are
//! constructed with a [`JsonSerializer`] and route every conversion through it.

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

/// Converts values to and from JSON text
///
/// Implementations must produce compact output if tokens are expected to be
/// byte-for-byte reproducible across backends.
pub trait JsonSerializer {
    /// Serialize `value` to JSON text
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String>;

    /// Deserialize JSON text into `T`
    fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<T>;
}

/// Compact JSON via `serde_json`, preserving object key order
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonSerializer;

impl JsonSerializer for SerdeJsonSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<T> {
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

impl<S: JsonSerializer> JsonSerializer for &S {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        (**self).serialize(value)
    }

    fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<T> {
        (**self).deserialize(json)
    }
}

impl<S: JsonSerializer> JsonSerializer for Arc<S> {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        (**self).serialize(value)
    }

    fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<T> {
        (**self).deserialize(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{Map, Value};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    struct Customer {
        first_name: String,
        age: u32,
    }

    #[test]
    fn test_serialize_is_compact_and_ordered() {
        let customer = Customer {
            first_name: "Bob".into(),
            age: 37,
        };
        assert_eq!(
            SerdeJsonSerializer.serialize(&customer).unwrap(),
            r#"{"FirstName":"Bob","Age":37}"#
        );
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let map: Map<String, Value> = SerdeJsonSerializer
            .deserialize(r#"{"typ":"JWT","alg":"HS256"}"#)
            .unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["typ", "alg"]);
        assert_eq!(
            SerdeJsonSerializer.serialize(&map).unwrap(),
            r#"{"typ":"JWT","alg":"HS256"}"#
        );
    }

    #[test]
    fn test_deserialize_error() {
        let result: Result<Customer> = SerdeJsonSerializer.deserialize(r#"{"FirstName":"Bob"}"#);
        assert!(matches!(result, Err(Error::Deserialization(_))));
    }

    #[test]
    fn test_serialize_error() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(
            SerdeJsonSerializer.serialize(&map),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_shared_serializer() {
        let shared = Arc::new(SerdeJsonSerializer);
        assert_eq!(shared.serialize(&37).unwrap(), "37");
        assert_eq!(shared.deserialize::<u32>("37").unwrap(), 37);
    }
}
