//! `SeaORM` entity definitions.

pub mod prelude;

pub mod categories;
pub mod entries;
pub mod sea_orm_active_enums;
pub mod users;
