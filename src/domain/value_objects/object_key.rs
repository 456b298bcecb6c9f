use crate::domain::errors::ValidationError;

/// A validated object key (path) in the storage system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > 1024 {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        // Check for invalid characters (null bytes)
        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        Ok(Self(value))
    }

    /// Create an ObjectKey from the percent-encoded form carried in storage
    /// event records. The event notation encodes spaces as `+`, so `+` is
    /// translated to a space before percent-decoding.
    pub fn from_event_key(raw: &str) -> Result<Self, ValidationError> {
        let unplussed = raw.replace('+', " ");
        let bytes = urlencoding::decode_binary(unplussed.as_bytes());
        Self::new(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this key has the given prefix
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
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
    fn test_valid_object_key() {
        assert!(ObjectKey::new("file.txt".to_string()).is_ok());
        assert!(ObjectKey::new("folder/file.txt".to_string()).is_ok());
        assert!(ObjectKey::new("deep/folder/structure/file.txt".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_object_key() {
        assert!(ObjectKey::new("".to_string()).is_err());
        assert!(ObjectKey::new("null\0byte".to_string()).is_err());
        assert!(ObjectKey::new("x".repeat(1025)).is_err());
    }

    #[test]
    fn test_event_key_percent_decoding() {
        let key = ObjectKey::from_event_key("f%2Bx.json").unwrap();
        assert_eq!(key.as_str(), "f+x.json");

        let key = ObjectKey::from_event_key("reports/finding%201.json").unwrap();
        assert_eq!(key.as_str(), "reports/finding 1.json");
    }

    #[test]
    fn test_event_key_plus_is_space() {
        let key = ObjectKey::from_event_key("my+file.json").unwrap();
        assert_eq!(key.as_str(), "my file.json");
    }

    #[test]
    fn test_event_key_plain_passthrough() {
        let key = ObjectKey::from_event_key("plain/key.json").unwrap();
        assert_eq!(key.as_str(), "plain/key.json");
    }

    #[test]
    fn test_empty_event_key_rejected() {
        assert!(ObjectKey::from_event_key("").is_err());
    }
}
