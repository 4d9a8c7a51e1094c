//! Repository layer.
//!
//! Each repository is a zero-sized struct whose async methods take `&PgPool`
//! (or an open transaction for the `*_in_tx` helpers) as the first argument
//! and return raw `sqlx::Error`s. Mapping to domain errors happens in
//! [`crate::store`] and in the API layer.

pub mod block_repo;
pub mod image_repo;
pub mod page_repo;
pub mod role_repo;
pub mod session_repo;
pub mod site_repo;
pub mod user_repo;

pub use block_repo::BlockRepo;
pub use image_repo::ImageRepo;
pub use page_repo::{GuardedWrite, PageRepo};
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use site_repo::SiteRepo;
pub use user_repo::UserRepo;
