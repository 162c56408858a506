/// An opaque key identifying an object within the configured bucket.
///
/// Keys are carried verbatim from the caller; the delete paths reject the
/// bucket-root markers (empty string and "/") before any network activity,
/// so construction itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey from any string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the key denotes the bucket root (empty or "/")
    pub fn is_root_marker(&self) -> bool {
        self.0.is_empty() || self.0 == "/"
    }
}

impl From<&str> for ObjectKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_marker_detection() {
        assert!(ObjectKey::new("").is_root_marker());
        assert!(ObjectKey::new("/").is_root_marker());
        assert!(!ObjectKey::new("file.txt").is_root_marker());
        assert!(!ObjectKey::new("folder/file.txt").is_root_marker());
        // a key that merely starts with a slash is not the root
        assert!(!ObjectKey::new("/leading").is_root_marker());
    }

    #[test]
    fn test_display_round_trip() {
        let key = ObjectKey::new("deep/folder/structure/file.txt");
        assert_eq!(key.to_string(), "deep/folder/structure/file.txt");
        assert_eq!(key.as_str(), "deep/folder/structure/file.txt");
    }
}
