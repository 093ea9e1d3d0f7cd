//! Core business logic for Kas.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Entry validation and the non-negative balance invariant
//! - `access` - Role/capability policy
//! - `auth` - Roles, account status and password hashing
//! - `registry` - Category and user registry rules
//! - `reports` - Period report assembly and printable rendering

pub mod access;
pub mod auth;
pub mod ledger;
pub mod registry;
pub mod reports;
