//! Input validation utilities.
//!
//! Identifier normalisation and required-field checks shared by the store, the
//! REST handlers and the CLI.

use crate::{StorageError, StorageResult};
use serde_json::Value;

/// Normalises a raw record id into the form the store persists.
///
/// The value must be a string that is non-empty once surrounding whitespace is
/// removed. The trimmed string is returned.
///
/// # Errors
///
/// Returns `StorageError::Validation` if the id is absent, not a string, or blank.
pub fn normalise_record_id(raw: Option<&Value>) -> StorageResult<String> {
    let trimmed = raw
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StorageError::validation("Spot record must include a non-empty 'id'."))?;

    Ok(trimmed.to_string())
}

/// Key used for case-insensitive id comparison.
pub fn lookup_key(id: &str) -> String {
    id.trim().to_lowercase()
}

/// True when `candidate` names the same spot as a precomputed [`lookup_key`].
pub fn id_matches(candidate: &str, key: &str) -> bool {
    candidate.to_lowercase() == key
}

/// Returns the names of `required` fields for which `is_present` is false, in order.
pub fn missing_fields<'a>(
    required: &[&'a str],
    mut is_present: impl FnMut(&str) -> bool,
) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| !is_present(field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_is_trimmed() {
        let id = normalise_record_id(Some(&json!("  lake-1 \t"))).unwrap();
        assert_eq!(id, "lake-1");
    }

    #[test]
    fn record_id_rejects_missing_blank_and_non_string() {
        for raw in [None, Some(json!("")), Some(json!("   ")), Some(json!(42)), Some(Value::Null)] {
            let err = normalise_record_id(raw.as_ref()).unwrap_err();
            assert!(matches!(err, StorageError::Validation(_)), "{raw:?}");
        }
    }

    #[test]
    fn lookup_key_ignores_case_and_padding() {
        let key = lookup_key(" Lake-1 ");
        assert!(id_matches("LAKE-1", &key));
        assert!(id_matches("lake-1", &key));
        assert!(!id_matches("lake-2", &key));
    }

    #[test]
    fn missing_fields_keeps_declared_order() {
        let present = ["name"];
        let missing = missing_fields(&["id", "name", "image"], |f| present.contains(&f));
        assert_eq!(missing, vec!["id", "image"]);
    }
}
