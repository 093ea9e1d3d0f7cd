//! Role/capability policy.
//!
//! One table decides which role may perform which operation. The HTTP layer
//! trusts the role carried in the caller's token and asks [`authorize`]
//! before touching the ledger or a registry.

use thiserror::Error;

use crate::auth::Role;

/// Operations guarded by a capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Record a new entry.
    CreateEntry,
    /// Amend an existing entry.
    AmendEntry,
    /// Delete an entry (additionally gated by configuration).
    DeleteEntry,
    /// List entry history.
    ReadEntries,
    /// Read the overall balance summary.
    ReadSummary,
    /// Produce a period report, printable or not.
    ReadReport,
    /// List categories.
    ReadCategories,
    /// Create, rename or delete categories.
    ManageCategories,
    /// Manage user accounts.
    ManageUsers,
}

/// Returned when a role lacks the capability for an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("role {role} is not permitted to perform {operation:?}")]
pub struct AccessError {
    /// Caller's role.
    pub role: Role,
    /// Attempted operation.
    pub operation: Operation,
}

/// Returns true if `role` may perform `operation`.
#[must_use]
pub const fn is_permitted(role: Role, operation: Operation) -> bool {
    match operation {
        Operation::CreateEntry
        | Operation::AmendEntry
        | Operation::DeleteEntry
        | Operation::ReadReport
        | Operation::ManageCategories => matches!(role, Role::Treasurer),
        Operation::ManageUsers => matches!(role, Role::Chair),
        Operation::ReadEntries | Operation::ReadSummary | Operation::ReadCategories => true,
    }
}

/// Checks a capability.
///
/// # Errors
///
/// Returns `AccessError` if `role` may not perform `operation`.
pub const fn authorize(role: Role, operation: Operation) -> Result<(), AccessError> {
    if is_permitted(role, operation) {
        Ok(())
    } else {
        Err(AccessError { role, operation })
    }
}
