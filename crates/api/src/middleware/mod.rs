//! Request extractors for authentication and role checks.
//!
//! - [`auth::AuthUser`]: a valid Bearer token is required.
//! - [`auth::MaybeAuthUser`]: a token is optional, but must be valid if sent.
//! - [`rbac::RequireAdmin`] / [`rbac::RequireAuth`]: role gates.

pub mod auth;
pub mod rbac;
