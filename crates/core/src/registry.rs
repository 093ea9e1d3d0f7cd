//! Category and user registry rules.
//!
//! Field validation for the two registries the ledger references. Uniqueness
//! and "still referenced by entries" checks need the store and live in the
//! repositories; they report through the same [`RegistryError`].

use kas_shared::types::{CategoryId, UserId};
use serde::Deserialize;
use thiserror::Error;

use crate::auth::{MIN_PASSWORD_LEN, Role, UserStatus};

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A required field is missing or blank.
    #[error("{0}")]
    Validation(String),

    /// Email does not look like `local@domain.tld`.
    #[error("Invalid email format")]
    InvalidEmail,

    /// Password shorter than the minimum.
    #[error("Password must be at least 8 characters")]
    WeakPassword,

    /// Unrecognized role.
    #[error("Invalid role: {0:?}")]
    InvalidRole(String),

    /// Unrecognized account status.
    #[error("Status must be 'ACTIVE' or 'INACTIVE', got {0:?}")]
    InvalidStatus(String),

    /// Path id is not a positive integer.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Category name already used.
    #[error("Category name already in use: {0}")]
    DuplicateCategory(String),

    /// Category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(i32),

    /// Category is referenced by entries.
    #[error("Category cannot be deleted because entries still use it")]
    CategoryInUse,

    /// Username already used.
    #[error("Username already in use")]
    DuplicateUsername,

    /// Email already used.
    #[error("Email already in use")]
    DuplicateEmail,

    /// User does not exist.
    #[error("User not found: {0}")]
    UserNotFound(i32),

    /// The chair tried to deactivate or delete their own account.
    #[error("You cannot deactivate or delete your own account")]
    SelfModification,

    /// User recorded entries; deactivate instead.
    #[error("User has recorded entries and cannot be deleted; deactivate the account instead")]
    UserHasEntries,
}

impl RegistryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::InvalidId(_) => "INVALID_ID",
            Self::DuplicateCategory(_) => "DUPLICATE_CATEGORY",
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::CategoryInUse => "CATEGORY_IN_USE",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::SelfModification => "SELF_MODIFICATION",
            Self::UserHasEntries => "USER_HAS_ENTRIES",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::CategoryNotFound(_) | Self::UserNotFound(_) => 404,
            _ => 400,
        }
    }
}

/// Category create/rename payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    /// Category name.
    #[serde(rename = "nama")]
    pub name: Option<String>,
}

/// New user payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUserInput {
    /// Login name.
    pub username: Option<String>,
    /// Email, used to log in.
    pub email: Option<String>,
    /// Plain password; hashed before storage.
    pub password: Option<String>,
    /// Role tag.
    pub role: Option<String>,
}

/// User profile update payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdateInput {
    /// Login name.
    pub username: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Role tag.
    pub role: Option<String>,
}

/// Status change payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusInput {
    /// `ACTIVE` or `INACTIVE`.
    pub status: Option<String>,
}

/// Password reset payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordResetInput {
    /// New plain password.
    pub password: Option<String>,
}

/// Validated new user. The password is still plain text here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Trimmed username.
    pub username: String,
    /// Trimmed email.
    pub email: String,
    /// Plain password.
    pub password: String,
    /// Role.
    pub role: Role,
}

/// Validated profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Trimmed username.
    pub username: String,
    /// Trimmed email.
    pub email: String,
    /// Role.
    pub role: Role,
}

/// Registry validation rules.
pub struct RegistryRules;

impl RegistryRules {
    /// Trims and checks a category name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Validation` if the name is missing or blank.
    pub fn category_name(input: &CategoryInput) -> Result<String, RegistryError> {
        required(input.name.as_deref(), "nama").map(str::to_string)
    }

    /// Validates a new user.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: missing field, email format,
    /// password length, then role.
    pub fn new_user(input: &NewUserInput) -> Result<NewUser, RegistryError> {
        let username = required(input.username.as_deref(), "username")?;
        let email = required(input.email.as_deref(), "email")?;
        let password = input
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| RegistryError::Validation("password is required".to_string()))?;
        let raw_role = required(input.role.as_deref(), "role")?;

        Self::email(email)?;
        Self::password(password)?;
        let role = Self::role(raw_role)?;

        Ok(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        })
    }

    /// Validates a profile update.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: missing field, email format, then role.
    pub fn user_profile(input: &UserUpdateInput) -> Result<UserProfile, RegistryError> {
        let username = required(input.username.as_deref(), "username")?;
        let email = required(input.email.as_deref(), "email")?;
        let raw_role = required(input.role.as_deref(), "role")?;

        Self::email(email)?;
        let role = Self::role(raw_role)?;

        Ok(UserProfile {
            username: username.to_string(),
            email: email.to_string(),
            role,
        })
    }

    /// Parses a requested status.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidStatus` for a missing or unknown value.
    pub fn status(input: &StatusInput) -> Result<UserStatus, RegistryError> {
        let raw = input.status.as_deref().unwrap_or_default();
        raw.parse::<UserStatus>()
            .map_err(|_| RegistryError::InvalidStatus(raw.to_string()))
    }

    /// Validates a password reset.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::WeakPassword` if missing or too short.
    pub fn password_reset(input: &PasswordResetInput) -> Result<String, RegistryError> {
        let password = input.password.as_deref().unwrap_or_default();
        Self::password(password)?;
        Ok(password.to_string())
    }

    /// Checks `local@domain.tld` shape: one `@`, no whitespace, a dot in the
    /// domain with text on both sides.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidEmail` otherwise.
    pub fn email(email: &str) -> Result<(), RegistryError> {
        let valid = !email.chars().any(char::is_whitespace)
            && email.split_once('@').is_some_and(|(local, domain)| {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain
                        .rsplit_once('.')
                        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            });

        if valid {
            Ok(())
        } else {
            Err(RegistryError::InvalidEmail)
        }
    }

    /// Checks the minimum password length in characters.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::WeakPassword` if too short.
    pub fn password(password: &str) -> Result<(), RegistryError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistryError::WeakPassword);
        }
        Ok(())
    }

    /// Parses a role tag.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidRole` for unknown roles.
    pub fn role(raw: &str) -> Result<Role, RegistryError> {
        raw.parse::<Role>()
            .map_err(|_| RegistryError::InvalidRole(raw.to_string()))
    }

    /// Parses a user path id.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidId` unless `raw` is a positive integer.
    pub fn parse_user_id(raw: &str) -> Result<UserId, RegistryError> {
        raw.parse::<UserId>()
            .map_err(|_| RegistryError::InvalidId(raw.to_string()))
    }

    /// Parses a category path id.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidId` unless `raw` is a positive integer.
    pub fn parse_category_id(raw: &str) -> Result<CategoryId, RegistryError> {
        raw.parse::<CategoryId>()
            .map_err(|_| RegistryError::InvalidId(raw.to_string()))
    }

    /// Refuses status changes and deletion aimed at the acting account.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SelfModification` when `actor == target`.
    pub fn ensure_not_self(actor: i32, target: i32) -> Result<(), RegistryError> {
        if actor == target {
            return Err(RegistryError::SelfModification);
        }
        Ok(())
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, RegistryError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RegistryError::Validation(format!("{field} is required")))
}
