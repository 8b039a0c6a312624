//! Store creation form.

use serde::Deserialize;

use pantry_core::{Address, Name};

use super::FieldErrors;
use crate::models::NewStore;

/// Store creation form data.
///
/// The address is optional: leaving every address field blank creates a store
/// without one, but a partly filled address must be complete and valid.
#[derive(Debug, Default, Deserialize)]
pub struct StoreCreateForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

impl StoreCreateForm {
    fn has_address(&self) -> bool {
        [&self.street_address, &self.city, &self.state, &self.zip_code]
            .iter()
            .any(|field| !field.trim().is_empty())
    }

    /// Validate the name and the optional address.
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(&self) -> Result<NewStore, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = Name::parse(&self.name)
            .map_err(|e| errors.push_name("name", &e))
            .ok();

        let address = if self.has_address() {
            match Address::parse(&self.street_address, &self.city, &self.state, &self.zip_code) {
                Ok(address) => Some(address),
                Err(e) => {
                    errors.push_address(&e);
                    None
                }
            }
        } else {
            None
        };

        match name {
            Some(name) if errors.is_empty() => Ok(NewStore { name, address }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, street: &str, city: &str, state: &str, zip: &str) -> StoreCreateForm {
        StoreCreateForm {
            name: name.to_string(),
            street_address: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip.to_string(),
        }
    }

    #[test]
    fn test_blank_address_is_none() {
        let store = form(" Corner Market ", " ", "", "", "").validate().unwrap();
        assert_eq!(store.name.as_str(), "corner market");
        assert!(store.address.is_none());
    }

    #[test]
    fn test_full_address_is_normalized() {
        let store = form("Market", "5 Market Road", "Springfield", "IL", "62701")
            .validate()
            .unwrap();
        assert_eq!(store.address.unwrap().city(), "springfield");
    }

    #[test]
    fn test_partial_address_reports_missing_fields() {
        let errors = form("Market", "5 Market Road", "", "", "")
            .validate()
            .unwrap_err();
        assert!(errors.get("city").is_some());
        assert!(errors.get("state").is_some());
        assert!(errors.get("zip_code").is_some());
        assert!(errors.get("street_address").is_none());
    }
}
