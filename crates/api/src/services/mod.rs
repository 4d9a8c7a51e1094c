//! Application services sitting between handlers and storage.

pub mod page_service;

pub use page_service::{PageInput, PageListItem, PageService, PageView};

use folio_core::types::Date;

/// The current calendar day in UTC, the reference date for scheduling and
/// status.
pub fn today_utc() -> Date {
    chrono::Utc::now().date_naive()
}
