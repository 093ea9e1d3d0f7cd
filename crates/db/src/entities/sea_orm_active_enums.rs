//! String-backed enums stored in the `users` and `entries` tables.
//!
//! Stored as short strings rather than database enum types so the schema is
//! identical on PostgreSQL and SQLite.

use kas_core::auth::{Role, UserStatus as CoreUserStatus};
use kas_core::ledger::EntryKind as CoreEntryKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    /// Organization chair.
    #[sea_orm(string_value = "CHAIR")]
    Chair,
    /// Treasurer.
    #[sea_orm(string_value = "TREASURER")]
    Treasurer,
    /// Member.
    #[sea_orm(string_value = "MEMBER")]
    Member,
}

/// Account status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserStatus {
    /// May log in.
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Disabled.
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
}

/// Entry kind column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EntryKind {
    /// Income.
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Expense.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Chair => Self::Chair,
            Role::Treasurer => Self::Treasurer,
            Role::Member => Self::Member,
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Chair => Self::Chair,
            UserRole::Treasurer => Self::Treasurer,
            UserRole::Member => Self::Member,
        }
    }
}

impl From<CoreUserStatus> for UserStatus {
    fn from(status: CoreUserStatus) -> Self {
        match status {
            CoreUserStatus::Active => Self::Active,
            CoreUserStatus::Inactive => Self::Inactive,
        }
    }
}

impl From<UserStatus> for CoreUserStatus {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => Self::Active,
            UserStatus::Inactive => Self::Inactive,
        }
    }
}

impl From<CoreEntryKind> for EntryKind {
    fn from(kind: CoreEntryKind) -> Self {
        match kind {
            CoreEntryKind::Income => Self::Income,
            CoreEntryKind::Expense => Self::Expense,
        }
    }
}

impl From<EntryKind> for CoreEntryKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}
