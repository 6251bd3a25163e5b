use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::{AppError, Role};

/// A signed-in society member. One seed account exists per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl User {
    /// "Name (Flat)" as used on complaints raised by residents.
    pub fn display_with_flat(&self) -> String {
        match &self.flat_no {
            Some(flat) => format!("{} ({})", self.name, flat),
            None => self.name.clone(),
        }
    }

    /// Label/value rows shown on the profile page.
    pub fn profile_details(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Email", self.email.clone()),
            (
                "Contact",
                self.contact.clone().unwrap_or_else(|| "N/A".to_string()),
            ),
            ("Role", self.role.to_string()),
        ];
        if self.role == Role::Resident {
            if let Some(flat) = &self.flat_no {
                rows.push(("Flat No", flat.clone()));
            }
        }
        rows
    }
}

/// Login form payload. The role picker is part of the credential check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Please enter a valid email address"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
    pub role: Role,
}

impl LoginRequest {
    /// Drop the stray spaces a pasted email carries. Run before validation
    /// so both sign-in paths accept the same input.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateProfileRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;

impl ChangePasswordRequest {
    /// Mismatch is reported before length, matching the settings form.
    pub fn check(&self) -> Result<(), AppError> {
        if self.current_password.is_empty() {
            return Err(AppError::field(
                "current_password",
                "Current password is required.",
            ));
        }
        if self.new_password != self.confirm_password {
            return Err(AppError::field(
                "confirm_password",
                "New passwords do not match.",
            ));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::field(
                "new_password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
            ));
        }
        Ok(())
    }
}

/// Generic acknowledgement body for simulated actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resident() -> User {
        User {
            id: "user-5".into(),
            name: "John Doe".into(),
            email: "john.doe@auraliva.com".into(),
            role: Role::Resident,
            avatar: String::new(),
            flat_no: Some("A-101".into()),
            contact: None,
        }
    }

    #[test]
    fn profile_details_include_flat_for_residents() {
        let rows = resident().profile_details();
        assert_eq!(
            rows,
            vec![
                ("Email", "john.doe@auraliva.com".to_string()),
                ("Contact", "N/A".to_string()),
                ("Role", "Resident".to_string()),
                ("Flat No", "A-101".to_string()),
            ]
        );
    }

    #[test]
    fn display_with_flat() {
        assert_eq!(resident().display_with_flat(), "John Doe (A-101)");
    }

    #[test]
    fn change_password_mismatch_reported_first() {
        let req = ChangePasswordRequest {
            current_password: "resident123".into(),
            new_password: "abc".into(),
            confirm_password: "abd".into(),
        };
        let err = req.check().unwrap_err();
        assert_eq!(err.message, "New passwords do not match.");
    }

    #[test]
    fn change_password_too_short() {
        let req = ChangePasswordRequest {
            current_password: "resident123".into(),
            new_password: "abc".into(),
            confirm_password: "abc".into(),
        };
        let err = req.check().unwrap_err();
        assert_eq!(err.message, "Password must be at least 6 characters long.");
    }

    #[test]
    fn change_password_ok() {
        let req = ChangePasswordRequest {
            current_password: "resident123".into(),
            new_password: "abcdef".into(),
            confirm_password: "abcdef".into(),
        };
        assert!(req.check().is_ok());
    }

    #[cfg(feature = "validation")]
    #[test]
    fn padded_seed_email_passes_validation_once_normalized() {
        use validator::Validate;
        let req = LoginRequest {
            email: " Treasurer@AuraLiva.com ".into(),
            password: "treasurer123".into(),
            role: Role::Treasurer,
        };
        assert!(req.validate().is_err());
        let req = req.normalized();
        assert_eq!(req.email, "Treasurer@AuraLiva.com");
        assert!(req.validate().is_ok());
    }
}
