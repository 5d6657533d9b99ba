//! CSRF token extracted from the browser cookie string

use std::fmt;

/// Anti-forgery token sent with every mutating request
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Find the named cookie in a `Cookie`-style string (`a=1; b=2`)
    ///
    /// The value is taken as-is, without percent-decoding. Returns `None`
    /// when the cookie is absent or empty.
    pub fn from_cookie_header(cookies: &str, name: &str) -> Option<Self> {
        cookies
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
            .filter(|value| !value.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the token out of logs
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(***)")
    }
}
