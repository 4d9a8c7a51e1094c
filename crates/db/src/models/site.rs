use folio_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// The single `site_settings` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSettings {
    pub site_name: String,
    pub updated_at: Timestamp,
}
