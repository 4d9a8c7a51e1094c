//! Domain rules for Folio pages and blocks.
//!
//! This crate has zero internal deps so the rules can be shared by the
//! repository layer, the API server and any future CLI tooling. Nothing in
//! here performs I/O.

pub mod blocks;
pub mod error;
pub mod page_status;
pub mod pages;
pub mod roles;
pub mod site;
pub mod types;
