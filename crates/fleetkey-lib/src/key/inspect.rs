//! Container ID format checks

use super::{FULL_ID_LEN, SHORT_ID_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a container ID as reported by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerIdForm {
    /// 64 hex characters
    Full,
    /// 12 hex characters
    Short,
    /// Hex, but shorter than the short form
    Abbreviated,
    /// Empty, non-hex, or an unusual length
    Unrecognized,
}

impl ContainerIdForm {
    /// Returns true for the two forms container runtimes actually emit
    pub fn is_runtime_id(&self) -> bool {
        matches!(self, ContainerIdForm::Full | ContainerIdForm::Short)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerIdForm::Full => "full",
            ContainerIdForm::Short => "short",
            ContainerIdForm::Abbreviated => "abbreviated",
            ContainerIdForm::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ContainerIdForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a container ID by length and alphabet
pub fn classify_container_id(id: &str) -> ContainerIdForm {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_hexdigit()) {
        return ContainerIdForm::Unrecognized;
    }

    // All ASCII from here, so byte length is the character count.
    match id.len() {
        FULL_ID_LEN => ContainerIdForm::Full,
        SHORT_ID_LEN => ContainerIdForm::Short,
        n if n < SHORT_ID_LEN => ContainerIdForm::Abbreviated,
        _ => ContainerIdForm::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_full_and_short() {
        let full = "a".repeat(64);
        assert_eq!(classify_container_id(&full), ContainerIdForm::Full);
        assert_eq!(classify_container_id("abc123def456"), ContainerIdForm::Short);
        assert_eq!(classify_container_id("ABC123DEF456"), ContainerIdForm::Short);
    }

    #[test]
    fn test_classify_abbreviated() {
        assert_eq!(classify_container_id("abc123"), ContainerIdForm::Abbreviated);
        assert!(!ContainerIdForm::Abbreviated.is_runtime_id());
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify_container_id(""), ContainerIdForm::Unrecognized);
        assert_eq!(classify_container_id("my-container"), ContainerIdForm::Unrecognized);
        // hex but neither 12 nor 64 long
        assert_eq!(
            classify_container_id("abc123def4567890ff"),
            ContainerIdForm::Unrecognized
        );
    }

    #[test]
    fn test_form_display() {
        assert_eq!(ContainerIdForm::Abbreviated.to_string(), "abbreviated");
        assert_eq!(
            serde_json::to_string(&ContainerIdForm::Full).unwrap(),
            "\"full\""
        );
    }
}
