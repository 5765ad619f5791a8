use crate::shared::error::FlashToolError;
use crate::shared::Result;
use std::fmt;

/// URL prefixes stripped before splitting, longest first
const ACCEPTED_PREFIXES: [&str; 3] = ["https://github.com/", "http://github.com/", "github.com/"];

/// RepositoryReference value object identifying a GitHub repository
///
/// Parsed once from user input and never normalized: owner and name keep
/// the case and characters the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryReference {
    owner: String,
    name: String,
}

impl RepositoryReference {
    pub fn new(owner: String, name: String) -> Result<Self> {
        if owner.is_empty() || name.is_empty() {
            return Err(FlashToolError::InvalidReference {
                input: format!("{}/{}", owner, name),
            }
            .into());
        }
        Ok(Self { owner, name })
    }

    /// Parses `owner/repo`, `github.com/owner/repo` or `https://github.com/owner/repo`
    ///
    /// The accepted prefix and any trailing slashes are stripped, then the
    /// remainder is split on the first `/`. Everything after it (including
    /// further slashes) becomes the name.
    ///
    /// # Errors
    /// Returns `FlashToolError::InvalidReference` when no separator remains
    /// or either side of it is empty.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let without_prefix = ACCEPTED_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);
        let path = without_prefix.trim_end_matches('/');

        let invalid = || FlashToolError::InvalidReference {
            input: input.to_string(),
        };

        let (owner, name) = path.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() {
            return Err(invalid().into());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(input: &str) {
        let err = RepositoryReference::parse(input).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<FlashToolError>(),
                Some(FlashToolError::InvalidReference { .. })
            ),
            "expected InvalidReference for {:?}, got {}",
            input,
            err
        );
    }

    #[test]
    fn test_parse_all_shapes_yield_same_pair() {
        let shapes = [
            "espressif/esp-idf",
            "github.com/espressif/esp-idf",
            "https://github.com/espressif/esp-idf",
            "https://github.com/espressif/esp-idf/",
        ];

        for shape in shapes {
            let reference = RepositoryReference::parse(shape).unwrap();
            assert_eq!(reference.owner(), "espressif", "input: {}", shape);
            assert_eq!(reference.name(), "esp-idf", "input: {}", shape);
        }
    }

    #[test]
    fn test_parse_without_separator_fails() {
        assert_invalid("esp-idf");
        assert_invalid("https://github.com/espressif");
        assert_invalid("github.com/");
        assert_invalid("");
    }

    #[test]
    fn test_parse_empty_owner_or_name_fails() {
        assert_invalid("/esp-idf");
        assert_invalid("espressif//");
    }

    #[test]
    fn test_parse_splits_on_first_separator_only() {
        let reference = RepositoryReference::parse("owner/repo/tree/main").unwrap();
        assert_eq!(reference.owner(), "owner");
        assert_eq!(reference.name(), "repo/tree/main");
    }

    #[test]
    fn test_parse_preserves_case() {
        let reference = RepositoryReference::parse("Khiyam/Gate-Lock").unwrap();
        assert_eq!(reference.owner(), "Khiyam");
        assert_eq!(reference.name(), "Gate-Lock");
    }

    #[test]
    fn test_display() {
        let reference = RepositoryReference::parse("github.com/owner/repo").unwrap();
        assert_eq!(reference.to_string(), "owner/repo");
    }

    #[test]
    fn test_new_rejects_empty_parts() {
        assert!(RepositoryReference::new("".to_string(), "repo".to_string()).is_err());
        assert!(RepositoryReference::new("owner".to_string(), "repo".to_string()).is_ok());
    }
}
