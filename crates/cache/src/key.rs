//! Structural validation of cache keys and path sets
//!
//! Validation is pure and runs before any I/O in both restore and save, so
//! malformed input never produces partial storage side effects.

use crate::{Error, Result};

/// Maximum length of a single cache key, in characters
pub const MAX_KEY_LENGTH: usize = 512;

/// Maximum number of keys in one lookup (primary plus restore keys)
pub const MAX_KEYS: usize = 10;

/// Validate a single cache key
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::validation("cache key must not be empty"));
    }
    if key.chars().count() > MAX_KEY_LENGTH {
        return Err(Error::validation(format!(
            "cache key exceeds {MAX_KEY_LENGTH} characters: {key}"
        )));
    }
    if key.contains(',') {
        return Err(Error::validation(format!(
            "cache key must not contain commas: {key}"
        )));
    }
    Ok(())
}

/// Validate the ordered lookup key list: the primary key plus every restore
/// key, and the combined count
pub fn validate_key_list(primary_key: &str, restore_keys: &[String]) -> Result<()> {
    if 1 + restore_keys.len() > MAX_KEYS {
        return Err(Error::validation(format!(
            "too many cache keys: {} given, at most {MAX_KEYS} allowed",
            1 + restore_keys.len()
        )));
    }
    validate_key(primary_key)?;
    for key in restore_keys {
        validate_key(key)?;
    }
    Ok(())
}

/// Validate the caller-supplied path set before resolution
pub fn validate_paths(paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Err(Error::validation("at least one cache path is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_key_at_length_limit() {
        let key = "k".repeat(MAX_KEY_LENGTH);
        assert!(validate_key(&key).is_ok());
    }

    #[test]
    fn rejects_key_over_length_limit() {
        let key = "k".repeat(MAX_KEY_LENGTH + 1);
        assert!(matches!(
            validate_key(&key),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn rejects_key_with_comma() {
        assert!(matches!(
            validate_key("linux,cargo"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn rejects_empty_key() {
        assert!(validate_key("").is_err());
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        // 512 two-byte characters is 1024 bytes but still a valid key
        let key = "é".repeat(MAX_KEY_LENGTH);
        assert!(validate_key(&key).is_ok());
    }

    #[test]
    fn accepts_key_list_at_count_limit() {
        let restore: Vec<String> = (1..MAX_KEYS).map(|i| format!("fallback-{i}")).collect();
        assert_eq!(restore.len(), MAX_KEYS - 1);
        assert!(validate_key_list("primary", &restore).is_ok());
    }

    #[test]
    fn rejects_key_list_over_count_limit() {
        let restore: Vec<String> = (0..MAX_KEYS).map(|i| format!("fallback-{i}")).collect();
        assert!(matches!(
            validate_key_list("primary", &restore),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn key_list_checks_every_entry() {
        let restore = vec!["ok".to_string(), "not,ok".to_string()];
        assert!(validate_key_list("primary", &restore).is_err());
    }

    #[test]
    fn rejects_empty_path_set() {
        assert!(matches!(
            validate_paths(&[]),
            Err(Error::Validation { .. })
        ));
        assert!(validate_paths(&["./dist".to_string()]).is_ok());
    }

    proptest! {
        #[test]
        fn comma_free_keys_within_limit_validate(key in "[a-zA-Z0-9_./-]{1,512}") {
            prop_assert!(validate_key(&key).is_ok());
        }

        #[test]
        fn any_key_containing_comma_fails(prefix in "[a-z]{0,16}", suffix in "[a-z]{0,16}") {
            let key = format!("{prefix},{suffix}");
            prop_assert!(validate_key(&key).is_err());
        }
    }
}
