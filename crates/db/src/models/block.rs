//! Block entity model.

use folio_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `blocks` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Block {
    pub id: DbId,
    pub page_id: DbId,
    /// One of `folio_core::blocks::VALID_BLOCK_TYPES`.
    pub block_type: String,
    pub content: String,
    pub position: i32,
}
