//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod category;
pub mod entry;
pub mod user;

pub use category::{CategoryError, CategoryRepository};
pub use entry::{EntryError, EntryRepository};
pub use user::{UserError, UserRepository};
