use crate::domain::errors::ValidationError;

/// A validated bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Create a new BucketName with S3-compatible validation rules
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.len() < 3 {
            return Err(ValidationError::BucketNameTooShort {
                actual: value.len(),
                min: 3,
            });
        }

        if value.len() > 63 {
            return Err(ValidationError::BucketNameTooLong {
                actual: value.len(),
                max: 63,
            });
        }

        // Must start and end with lowercase letter or number
        let valid_edge = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
        if !value.chars().next().is_some_and(valid_edge) {
            return Err(ValidationError::BucketNameInvalidStart);
        }
        if !value.chars().last().is_some_and(valid_edge) {
            return Err(ValidationError::BucketNameInvalidEnd);
        }

        // Only lowercase letters, numbers, hyphens, and dots
        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '.' {
                return Err(ValidationError::BucketNameInvalidCharacter(c));
            }
        }

        if value.contains("--") {
            return Err(ValidationError::BucketNameConsecutiveHyphens);
        }

        // Cannot be formatted as an IP address
        if value.split('.').count() == 4 && value.split('.').all(|p| p.parse::<u8>().is_ok()) {
            return Err(ValidationError::BucketNameLooksLikeIpAddress);
        }

        Ok(Self(value))
    }

    /// Get the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        assert!(BucketName::new("my-bucket".to_string()).is_ok());
        assert!(BucketName::new("bucket123".to_string()).is_ok());
        assert!(BucketName::new("a2z".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert!(BucketName::new("ab".to_string()).is_err());
        assert!(BucketName::new("a".repeat(64)).is_err());
        assert!(BucketName::new("-starts-with-hyphen".to_string()).is_err());
        assert!(BucketName::new("ends-with-hyphen-".to_string()).is_err());
        assert!(BucketName::new("UpperCase".to_string()).is_err());
        assert!(BucketName::new("double--hyphen".to_string()).is_err());
        assert!(BucketName::new("192.168.1.1".to_string()).is_err());
    }
}
