//! Postal addresses.
//!
//! A household is identified by its normalized address. Stores may carry an
//! address too, using the same rules.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::name::normalize;

/// The individual fields of an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    StreetAddress,
    City,
    State,
    ZipCode,
}

impl AddressField {
    /// Form field name for this address component.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StreetAddress => "street_address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip_code",
        }
    }
}

/// Errors that can occur when parsing an [`Address`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// A required field is empty after trimming.
    #[error("This field is required.")]
    Empty(AddressField),
    /// A field exceeds its maximum length.
    #[error("Must be at most {max} characters.")]
    TooLong {
        /// The offending field.
        field: AddressField,
        /// Maximum allowed length.
        max: usize,
    },
    /// The state is not a two-letter code.
    #[error("Use the two-letter state code.")]
    InvalidState,
    /// The zip code is not five digits.
    #[error("Zip code must be exactly 5 digits.")]
    InvalidZipCode,
}

impl AddressError {
    /// The field this error refers to.
    #[must_use]
    pub const fn field(&self) -> AddressField {
        match self {
            Self::Empty(field) | Self::TooLong { field, .. } => *field,
            Self::InvalidState => AddressField::State,
            Self::InvalidZipCode => AddressField::ZipCode,
        }
    }
}

/// A normalized postal address.
///
/// ## Constraints
///
/// - Every field trimmed and lower-cased
/// - Street address and city: 1-100 characters
/// - State: exactly two ASCII letters
/// - Zip code: exactly five ASCII digits
///
/// ## Examples
///
/// ```
/// use pantry_core::Address;
///
/// let address = Address::parse(" 12 Elm Street ", "Springfield", "IL", "62704").unwrap();
/// assert_eq!(address.street_address(), "12 elm street");
/// assert_eq!(address.to_string(), "12 Elm Street Springfield, IL 62704");
///
/// assert!(Address::parse("", "Springfield", "Illinois", "627").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Address {
    street_address: String,
    city: String,
    state: String,
    zip_code: String,
}

impl Address {
    /// Maximum length of the street address and city, in characters.
    pub const MAX_LINE_LENGTH: usize = 100;

    /// Parse and normalize an address.
    ///
    /// Every field is checked so callers can report all problems at once.
    ///
    /// # Errors
    ///
    /// Returns the list of field errors if any component is invalid.
    pub fn parse(
        street_address: &str,
        city: &str,
        state: &str,
        zip_code: &str,
    ) -> Result<Self, Vec<AddressError>> {
        let mut errors = Vec::new();

        let street_address = normalize(street_address);
        check_line(&street_address, AddressField::StreetAddress, &mut errors);

        let city = normalize(city);
        check_line(&city, AddressField::City, &mut errors);

        let state = normalize(state);
        if state.is_empty() {
            errors.push(AddressError::Empty(AddressField::State));
        } else if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(AddressError::InvalidState);
        }

        let zip_code = normalize(zip_code);
        if zip_code.is_empty() {
            errors.push(AddressError::Empty(AddressField::ZipCode));
        } else if zip_code.len() != 5 || !zip_code.chars().all(|c| c.is_ascii_digit()) {
            errors.push(AddressError::InvalidZipCode);
        }

        if errors.is_empty() {
            Ok(Self {
                street_address,
                city,
                state,
                zip_code,
            })
        } else {
            Err(errors)
        }
    }

    /// Rebuild an address from already-normalized stored values.
    #[must_use]
    pub const fn from_stored(
        street_address: String,
        city: String,
        state: String,
        zip_code: String,
    ) -> Self {
        Self {
            street_address,
            city,
            state,
            zip_code,
        }
    }

    #[must_use]
    pub fn street_address(&self) -> &str {
        &self.street_address
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}",
            title_case(&self.street_address),
            title_case(&self.city),
            self.state.to_uppercase(),
            self.zip_code
        )
    }
}

fn check_line(value: &str, field: AddressField, errors: &mut Vec<AddressError>) {
    if value.is_empty() {
        errors.push(AddressError::Empty(field));
    } else if value.chars().count() > Address::MAX_LINE_LENGTH {
        errors.push(AddressError::TooLong {
            field,
            max: Address::MAX_LINE_LENGTH,
        });
    }
}

/// Upper-case the first letter of every whitespace-separated word.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
