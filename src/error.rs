//! Errors for jwtcodec

use thiserror::Error;

/// Errors raised while encoding or decoding a token
///
/// Every way a token can fail to be trusted (wrong key, tampered signature,
/// expired or malformed `exp` claim) is reported as [`Error::SignatureInvalid`]
/// so callers cannot tell forgery apart from expiry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Header too large: {size} bytes (maximum: {max} bytes)")]
    HeaderTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid JWT format: expected three non-empty parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("Invalid HMAC key: {0}")]
    KeyInvalid(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Invalid signature")]
    SignatureInvalid,

    // ============================================================================
    // Serializer Errors
    // ============================================================================
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Deserialization failed: {0}")]
    Deserialization(String),
}

/// Result type alias for jwtcodec operations
pub type Result<T> = std::result::Result<T, Error>;
