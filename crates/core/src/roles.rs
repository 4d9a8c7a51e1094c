//! Well-known role name constants.
//!
//! These must match the seed data in `20240101000001_create_roles.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_AUTHOR: &str = "author";
