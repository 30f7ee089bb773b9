//! Translation keys.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Namespace reserved for messages shipped with Parley itself.
pub const LIBRARY_NAMESPACE: &str = "parley";

/// Opaque, case-sensitive identifier of a translatable message.
///
/// Keys are namespaced by convention with dots (`domain.category.name`).
/// Cloning is cheap; the string is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Arc<str>);

impl Key {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// A key inside the library namespace, e.g. `parley.exception.guild_only`.
    pub fn library(value: &str) -> Self {
        Self::namespaced(LIBRARY_NAMESPACE, value)
    }

    /// Join a namespace and a key with a dot.
    pub fn namespaced(namespace: &str, value: &str) -> Self {
        if namespace.is_empty() {
            return Self::new(value);
        }
        Self::new(format!("{namespace}.{value}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Leading segment before the first dot, if the key has one.
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once('.').map(|(ns, _)| ns)
    }

    /// Append a dotted segment: `greet` + `hello` = `greet.hello`.
    pub fn child(&self, segment: &str) -> Self {
        Self::namespaced(self.as_str(), segment)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_ne!(Key::from("greet.Hello"), Key::from("greet.hello"));
    }

    #[test]
    fn test_library_key() {
        let key = Key::library("exception.guild_only");
        assert_eq!(key.as_str(), "parley.exception.guild_only");
        assert_eq!(key.namespace(), Some("parley"));
    }

    #[test]
    fn test_namespaced_with_empty_namespace() {
        assert_eq!(Key::namespaced("", "plain").as_str(), "plain");
        assert_eq!(Key::from("plain").namespace(), None);
    }

    #[test]
    fn test_child_appends_segment() {
        let key = Key::from("arg").child("user");
        assert_eq!(key.to_string(), "arg.user");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Key::from("a.b"), 1);
        assert_eq!(map.get("a.b"), Some(&1));
    }
}
