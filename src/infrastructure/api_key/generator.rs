//! API Key generation
//!
//! Keys are `sk-` followed by a random (v4) UUID, synthesized before insert.

use uuid::Uuid;

use crate::domain::api_key::KEY_PREFIX;

/// Generator for new plaintext keys
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyGenerator;

impl KeyGenerator {
    /// Generate a new key
    pub fn generate(&self) -> String {
        format!("{}{}", KEY_PREFIX, Uuid::new_v4().hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::{validate_key_format, KEY_LENGTH};

    #[test]
    fn test_generate_key() {
        let key = KeyGenerator::default().generate();

        assert!(key.starts_with("sk-"));
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(validate_key_format(&key).is_ok());
    }

    #[test]
    fn test_generated_body_is_v4_uuid() {
        let key = KeyGenerator::default().generate();
        let body = Uuid::parse_str(&key[3..]).unwrap();

        assert_eq!(body.get_version_num(), 4);
    }

    #[test]
    fn test_key_uniqueness() {
        let generator = KeyGenerator::default();

        assert_ne!(generator.generate(), generator.generate());
    }
}
