//! Folio API server library.
//!
//! Exposes config, state, error handling, the page service and the route
//! tree so the binary and the integration tests build the same app.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
