//! Page entity model and DTOs.

use folio_core::page_status::{resolve_status, PageStatus};
use folio_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::block::Block;

/// A row from the `pages` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub creation_date: Date,
    pub publication_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Page metadata joined with the author's display name, as used by listings
/// and the single-page view.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PageSummary {
    pub id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub title: String,
    pub creation_date: Date,
    pub publication_date: Option<Date>,
}

impl PageSummary {
    pub fn status(&self, today: Date) -> PageStatus {
        resolve_status(self.creation_date, self.publication_date, false, today)
    }
}

/// A page with its blocks in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWithBlocks {
    pub page: PageSummary,
    pub blocks: Vec<Block>,
}

/// DTO for inserting a page. Blocks are passed alongside.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub author_id: DbId,
    pub title: String,
    pub creation_date: Date,
    pub publication_date: Option<Date>,
}

/// The replaceable part of a page. `creation_date` is immutable and absent.
#[derive(Debug, Clone)]
pub struct PageMetadata {
    pub author_id: DbId,
    pub title: String,
    pub publication_date: Option<Date>,
}
