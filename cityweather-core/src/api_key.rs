//! API credential that never shows up in logs or debug output.

use std::fmt;

use zeroize::Zeroize;

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    inner: String,
}

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// The raw key. Only for placing it on an outgoing request.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
