//! Entity re-exports.

pub use super::categories::Entity as Categories;
pub use super::entries::Entity as Entries;
pub use super::users::Entity as Users;
