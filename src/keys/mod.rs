/// HMAC secret key
///
/// The codec accepts any `AsRef<[u8]>` as a key; `Key` exists for callers
/// who want to hold on to a secret without it showing up in `Debug` output.
/// Key strength is not checked.
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    secret: Vec<u8>,
}

impl Key {
    /// Create a new key from raw secret bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    /// Number of secret bytes
    pub fn len(&self) -> usize {
        self.secret.len()
    }

    /// True if the secret is empty
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Key {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for Key {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for Key {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for Key {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}
