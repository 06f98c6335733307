//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded JWT header JSON (8KB)
/// Headers are typically small (< 1KB), extra headers included
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// HS512 produces 64 bytes; anything far beyond that is not ours
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;
