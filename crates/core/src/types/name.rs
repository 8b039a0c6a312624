//! Normalized identity names.
//!
//! Member, store, and item names are compared case- and whitespace-insensitively.
//! Rather than relying on collations, every name is normalized (trimmed and
//! lower-cased) before it is stored or used in a lookup.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Trim surrounding whitespace and lower-case the input.
///
/// This is the single normalization used for every identity field, on write
/// and on lookup.
///
/// ```
/// use pantry_core::normalize;
///
/// assert_eq!(normalize("  Corner Market "), "corner market");
/// ```
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Errors that can occur when parsing a [`Name`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The input is empty after trimming.
    #[error("This field is required.")]
    Empty,
    /// The input is too long.
    #[error("Must be at most {max} characters.")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A normalized identity name (member, store, or item).
///
/// ## Constraints
///
/// - Trimmed and lower-cased
/// - Length: 1-100 characters after normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Maximum length of a name, in characters.
    pub const MAX_LENGTH: usize = 100;

    /// Parse and normalize a `Name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized input is empty or longer than
    /// [`Name::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        let normalized = normalize(s);

        if normalized.is_empty() {
            return Err(NameError::Empty);
        }

        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Name` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Stored names are already normalized, so decoding does not re-validate.
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Name {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Name {
    fn decode(
        value: <sqlx::Sqlite as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Name {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  ALICE\t"), "alice");
        assert_eq!(normalize("Mixed Case Name"), "mixed case name");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_parse_normalizes() {
        let name = Name::parse("  Whole Foods ").unwrap();
        assert_eq!(name.as_str(), "whole foods");
    }

    #[test]
    fn test_parse_equivalent_inputs_are_equal() {
        assert_eq!(Name::parse("Bob").unwrap(), Name::parse(" bob ").unwrap());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Name::parse(""), Err(NameError::Empty));
        assert_eq!(Name::parse("  \n "), Err(NameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Name::MAX_LENGTH + 1);
        assert!(matches!(Name::parse(&long), Err(NameError::TooLong { .. })));

        let exact = "a".repeat(Name::MAX_LENGTH);
        assert!(Name::parse(&exact).is_ok());
    }
}
