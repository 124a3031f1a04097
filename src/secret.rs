use std::fmt;

/// A credential that must never reach logs or terminal output.
///
/// Submitted passwords travel through the session store wrapped in
/// `Secret`. Formatting always prints `[REDACTED]`; the value is only
/// reachable through [`expose_secret`](Self::expose_secret) or compared with
/// [`matches`](Secret::matches).
///
/// # Examples
///
/// ```
/// use workforce_access::Secret;
///
/// let password = Secret::new("password123".to_string());
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert!(password.matches("password123"));
/// ```
// Do not derive Clone, Copy or Default: credentials should not be duplicated
// or conjured implicitly.
pub struct Secret<T> {
    // Must stay private, otherwise redaction is moot.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the wrapped value.
    ///
    /// Callers must not log or display the result.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl Secret<String> {
    /// Compares the wrapped credential with a candidate.
    pub fn matches(&self, candidate: &str) -> bool {
        self.inner == candidate
    }
}

impl From<&str> for Secret<String> {
    fn from(value: &str) -> Self {
        Secret::new(value.to_string())
    }
}

impl From<String> for Secret<String> {
    fn from(value: String) -> Self {
        Secret::new(value)
    }
}

impl<T> fmt::Debug for Secret<T> {
    // Must print "[REDACTED]" unconditionally, debug builds included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
