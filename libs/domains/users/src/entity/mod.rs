//! SeaORM entities for the `users`, `groups` and `user_groups` tables.

pub mod group;
pub mod membership;
pub mod user;
