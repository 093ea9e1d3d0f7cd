//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - User role and account status definitions

mod password;

pub use password::{MIN_PASSWORD_LEN, PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error for an unrecognized role or status tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized value: {0}")]
pub struct UnknownTag(pub String);

/// Roles within the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Organization chair (ketua). Manages user accounts.
    Chair,
    /// Treasurer (bendahara). Records entries, manages categories, prints reports.
    Treasurer,
    /// Ordinary member (jamaah). Read-only.
    Member,
}

impl Role {
    /// Returns the canonical tag stored in the database and carried in tokens.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chair => "CHAIR",
            Self::Treasurer => "TREASURER",
            Self::Member => "MEMBER",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownTag;

    /// Case-insensitive; also accepts the organization's local role names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CHAIR" | "KETUA" => Ok(Self::Chair),
            "TREASURER" | "BENDAHARA" => Ok(Self::Treasurer),
            "MEMBER" | "JAMAAH" => Ok(Self::Member),
            _ => Err(UnknownTag(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status. Inactive accounts cannot log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Account may log in.
    Active,
    /// Account is disabled.
    Inactive,
}

impl UserStatus {
    /// Returns the canonical tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for UserStatus {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" | "AKTIF" => Ok(Self::Active),
            "INACTIVE" | "NONAKTIF" => Ok(Self::Inactive),
            _ => Err(UnknownTag(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
