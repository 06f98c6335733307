mod validator;

pub use validator::{ClaimsValidator, ExpirationCheck};

/// Name of the expiration claim
pub const EXPIRATION_CLAIM: &str = "exp";
