//! Credentials and tokens.
//!
//! - [`password`]: Argon2id hashing of stored passwords.
//! - [`jwt`]: HS256 access tokens and opaque refresh tokens.

pub mod jwt;
pub mod password;
