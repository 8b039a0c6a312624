//! Household login and signup forms.

use secrecy::SecretString;
use serde::Deserialize;

use pantry_core::Address;

use super::{FieldErrors, REQUIRED};

/// Minimum passcode length, in characters.
pub const MIN_PASSCODE_LENGTH: usize = 4;

/// Household login form data.
#[derive(Default, Deserialize)]
pub struct HouseholdSelectForm {
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub passcode: String,
}

impl std::fmt::Debug for HouseholdSelectForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HouseholdSelectForm")
            .field("street_address", &self.street_address)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("zip_code", &self.zip_code)
            .field("passcode", &"[REDACTED]")
            .finish()
    }
}

/// A well-formed household login attempt.
#[derive(Debug)]
pub struct HouseholdLogin {
    pub address: Address,
    pub passcode: SecretString,
}

impl HouseholdSelectForm {
    /// Check the address format and that a passcode was given.
    ///
    /// # Errors
    ///
    /// Returns the field errors if the address is malformed or the passcode is
    /// blank.
    pub fn validate(&self) -> Result<HouseholdLogin, FieldErrors> {
        let mut errors = FieldErrors::new();

        let address = Address::parse(&self.street_address, &self.city, &self.state, &self.zip_code)
            .map_err(|e| errors.push_address(&e))
            .ok();

        if self.passcode.is_empty() {
            errors.push("passcode", REQUIRED);
        }

        match address {
            Some(address) if errors.is_empty() => Ok(HouseholdLogin {
                address,
                passcode: SecretString::from(self.passcode.clone()),
            }),
            _ => Err(errors),
        }
    }
}

/// Household signup form data.
#[derive(Default, Deserialize)]
pub struct HouseholdCreateForm {
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub passcode: String,
    #[serde(default)]
    pub passcode_confirmation: String,
}

impl std::fmt::Debug for HouseholdCreateForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HouseholdCreateForm")
            .field("street_address", &self.street_address)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("zip_code", &self.zip_code)
            .field("passcode", &"[REDACTED]")
            .field("passcode_confirmation", &"[REDACTED]")
            .finish()
    }
}

/// A validated household signup.
#[derive(Debug)]
pub struct NewHousehold {
    pub address: Address,
    pub passcode: SecretString,
}

impl HouseholdCreateForm {
    /// Validate the address, the passcode length, and the confirmation.
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(&self) -> Result<NewHousehold, FieldErrors> {
        let mut errors = FieldErrors::new();

        let address = Address::parse(&self.street_address, &self.city, &self.state, &self.zip_code)
            .map_err(|e| errors.push_address(&e))
            .ok();

        if self.passcode.is_empty() {
            errors.push("passcode", REQUIRED);
        } else if self.passcode.chars().count() < MIN_PASSCODE_LENGTH {
            errors.push(
                "passcode",
                format!("Passcode must be at least {MIN_PASSCODE_LENGTH} characters."),
            );
        } else if self.passcode != self.passcode_confirmation {
            errors.push("passcode_confirmation", "Passcodes do not match.");
        }

        match address {
            Some(address) if errors.is_empty() => Ok(NewHousehold {
                address,
                passcode: SecretString::from(self.passcode.clone()),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn create_form(passcode: &str, confirmation: &str) -> HouseholdCreateForm {
        HouseholdCreateForm {
            street_address: "12 Elm Street".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62704".to_string(),
            passcode: passcode.to_string(),
            passcode_confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn test_create_normalizes_address() {
        let valid = create_form("open-sesame", "open-sesame").validate().unwrap();
        assert_eq!(valid.address.street_address(), "12 elm street");
        assert_eq!(valid.address.state(), "il");
        assert_eq!(valid.passcode.expose_secret(), "open-sesame");
    }

    #[test]
    fn test_create_rejects_mismatched_confirmation() {
        let errors = create_form("open-sesame", "open-sesame!").validate().unwrap_err();
        assert_eq!(
            errors.get("passcode_confirmation"),
            Some("Passcodes do not match.")
        );
    }

    #[test]
    fn test_create_rejects_short_passcode() {
        let errors = create_form("abc", "abc").validate().unwrap_err();
        assert!(errors.get("passcode").is_some());
    }

    #[test]
    fn test_create_reports_address_and_passcode_errors_together() {
        let mut form = create_form("", "");
        form.zip_code = "627".to_string();
        form.state = "Illinois".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.get("zip_code").is_some());
        assert!(errors.get("state").is_some());
        assert_eq!(errors.get("passcode"), Some(REQUIRED));
    }

    #[test]
    fn test_select_requires_passcode() {
        let form = HouseholdSelectForm {
            street_address: "12 Elm Street".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62704".to_string(),
            passcode: String::new(),
        };
        assert_eq!(form.validate().unwrap_err().get("passcode"), Some(REQUIRED));
    }

    #[test]
    fn test_debug_redacts_passcodes() {
        let output = format!("{:?}", create_form("open-sesame", "open-sesame"));
        assert!(!output.contains("open-sesame"));
        assert!(output.contains("[REDACTED]"));
    }
}
