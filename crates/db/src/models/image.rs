use folio_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// An entry of the read-only image catalogue. Image blocks store `path`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub name: String,
    pub path: String,
}
