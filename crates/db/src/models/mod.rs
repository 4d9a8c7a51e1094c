//! Row structs and DTOs.
//!
//! Entity structs derive `FromRow` and match the table columns; input DTOs
//! carry only what an insert or replace needs.

pub mod block;
pub mod image;
pub mod page;
pub mod role;
pub mod session;
pub mod site;
pub mod user;
