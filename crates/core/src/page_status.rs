//! Page lifecycle status derived from dates (never stored).
//!
//! Comparison is by calendar day: a page whose publication date is today is
//! already published, whatever the time of day.

use serde::{Deserialize, Serialize};

use crate::types::Date;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_DELETED: &str = "deleted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Scheduled,
    Published,
    /// Tombstone used by clients between a delete request and its confirmation.
    Deleted,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Draft => STATUS_DRAFT,
            PageStatus::Scheduled => STATUS_SCHEDULED,
            PageStatus::Published => STATUS_PUBLISHED,
            PageStatus::Deleted => STATUS_DELETED,
        }
    }

    /// Whether anonymous readers may see the page.
    pub fn is_public(self) -> bool {
        self == PageStatus::Published
    }
}

/// Classify a page.
///
/// - `Deleted` when `deleted` is set.
/// - `Draft` when there is no publication date.
/// - `Scheduled` when the publication date is after `today`.
/// - `Published` otherwise.
///
/// The creation date does not affect the result; the store rejects publication
/// dates before it.
pub fn resolve_status(
    _creation_date: Date,
    publication_date: Option<Date>,
    deleted: bool,
    today: Date,
) -> PageStatus {
    if deleted {
        return PageStatus::Deleted;
    }
    match publication_date {
        None => PageStatus::Draft,
        Some(published) if published > today => PageStatus::Scheduled,
        Some(_) => PageStatus::Published,
    }
}
