//! Member login and signup forms.

use secrecy::SecretString;
use serde::Deserialize;

use pantry_core::{MemberId, Name};

use super::{FieldErrors, REQUIRED};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Member login form data.
#[derive(Default, Deserialize)]
pub struct MemberSelectForm {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for MemberSelectForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberSelectForm")
            .field("member_id", &self.member_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A well-formed member login attempt.
#[derive(Debug)]
pub struct MemberLogin {
    pub member_id: MemberId,
    pub password: SecretString,
}

impl MemberSelectForm {
    /// Check that a member was picked and a password given.
    ///
    /// # Errors
    ///
    /// Returns the field errors if the member id is missing or malformed, or
    /// the password is blank.
    pub fn validate(&self) -> Result<MemberLogin, FieldErrors> {
        let mut errors = FieldErrors::new();

        let member_id = self
            .member_id
            .parse::<MemberId>()
            .map_err(|_| errors.push("member_id", "Select a member."))
            .ok();

        if self.password.is_empty() {
            errors.push("password", REQUIRED);
        }

        match member_id {
            Some(member_id) if errors.is_empty() => Ok(MemberLogin {
                member_id,
                password: SecretString::from(self.password.clone()),
            }),
            _ => Err(errors),
        }
    }
}

/// Member signup form data.
#[derive(Default, Deserialize)]
pub struct MemberCreateForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

impl std::fmt::Debug for MemberCreateForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberCreateForm")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

/// A validated member signup.
#[derive(Debug)]
pub struct NewMember {
    pub name: Name,
    pub password: SecretString,
}

impl MemberCreateForm {
    /// Validate the name, the password length, and the confirmation.
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(&self) -> Result<NewMember, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = Name::parse(&self.name)
            .map_err(|e| errors.push_name("name", &e))
            .ok();

        if self.password.is_empty() {
            errors.push("password", REQUIRED);
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters."),
            );
        } else if self.password != self.password_confirmation {
            errors.push("password_confirmation", "Passwords do not match.");
        }

        match name {
            Some(name) if errors.is_empty() => Ok(NewMember {
                name,
                password: SecretString::from(self.password.clone()),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn create_form(name: &str, password: &str, confirmation: &str) -> MemberCreateForm {
        MemberCreateForm {
            name: name.to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn test_create_normalizes_name() {
        let valid = create_form("  Ann Lee ", "correct horse", "correct horse")
            .validate()
            .unwrap();
        assert_eq!(valid.name.as_str(), "ann lee");
    }

    #[test]
    fn test_create_rejects_short_and_mismatched_passwords() {
        let errors = create_form("ann", "short", "short").validate().unwrap_err();
        assert!(errors.get("password").is_some());

        let errors = create_form("ann", "correct horse", "battery staple")
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.get("password_confirmation"),
            Some("Passwords do not match.")
        );
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let errors = create_form("   ", "correct horse", "correct horse")
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("name"), Some(REQUIRED));
    }

    #[test]
    fn test_select_parses_member_id() {
        let form = MemberSelectForm {
            member_id: " 7 ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(form.validate().unwrap().member_id, MemberId::new(7));

        let form = MemberSelectForm {
            member_id: "seven".to_string(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("member_id"), Some("Select a member."));
        assert_eq!(errors.get("password"), Some(REQUIRED));
    }
}
