//! Form input and pre-write validation.
//!
//! Every form is deserialized as raw strings so that malformed numbers become
//! field-scoped messages instead of extractor rejections. `validate()` turns a
//! form into a validated value or a [`FieldErrors`] list; nothing is written
//! until validation passes.

pub mod household;
pub mod item;
pub mod member;
pub mod store;

pub use household::{HouseholdCreateForm, HouseholdLogin, HouseholdSelectForm, NewHousehold};
pub use item::{ItemCreateForm, StockUpdateForm};
pub use member::{MemberCreateForm, MemberLogin, MemberSelectForm, NewMember};
pub use store::StoreCreateForm;

use pantry_core::{AddressError, NameError};

/// Key for errors that do not belong to a single field.
pub const FORM: &str = "__all__";

/// Message for a blank required field.
pub(crate) const REQUIRED: &str = "This field is required.";

/// Field-scoped validation messages, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// A single error not tied to a field.
    #[must_use]
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(FORM, message);
        errors
    }

    /// Record a message for `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_owned(), message.into()));
    }

    /// First message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    pub(crate) fn push_address(&mut self, errors: &[AddressError]) {
        for err in errors {
            self.push(err.field().as_str(), err.to_string());
        }
    }

    pub(crate) fn push_name(&mut self, field: &str, err: &NameError) {
        self.push(field, err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_first_message() {
        let mut errors = FieldErrors::new();
        errors.push("name", "first");
        errors.push("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.get("city"), None);
    }

    #[test]
    fn test_form_error() {
        let errors = FieldErrors::form("Invalid address or passcode.");
        assert_eq!(errors.get(FORM), Some("Invalid address or passcode."));
        assert_eq!(errors.iter().count(), 1);
    }
}
