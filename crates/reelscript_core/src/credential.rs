//! Provider credentials.

/// An API key for the chat-completion provider.
///
/// `Debug` and `Display` never print the key itself.
///
/// # Examples
///
/// ```
/// use reelscript_core::ApiKey;
///
/// let key = ApiKey::new("sk-live-123");
/// assert_eq!(key.expose(), "sk-live-123");
/// assert!(!format!("{:?}", key).contains("sk-live"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Wrap a raw key, treating blank input as absent.
    pub fn non_empty(key: impl Into<String>) -> Option<Self> {
        Some(Self(key.into())).filter(|key| !key.is_blank())
    }

    /// True when the key is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The raw key, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_are_absent() {
        assert!(ApiKey::non_empty("").is_none());
        assert!(ApiKey::non_empty("   ").is_none());
        assert!(ApiKey::new("\n").is_blank());
        assert_eq!(ApiKey::non_empty("k").map(|k| k.expose().to_string()), Some("k".into()));
    }

    #[test]
    fn display_is_redacted() {
        let key = ApiKey::from("secret");
        assert_eq!(key.to_string(), "***");
    }
}
