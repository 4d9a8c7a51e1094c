//! The page content store port and its Postgres implementation.
//!
//! The page service depends on [`PageStore`] only, so it can run against
//! an in-memory store in tests. Every method reports failures as
//! [`CoreError`]; database errors become [`CoreError::StorageFault`].

use async_trait::async_trait;
use folio_core::blocks::BlockDraft;
use folio_core::error::CoreError;
use folio_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::page::{NewPage, Page, PageMetadata, PageSummary, PageWithBlocks};
use crate::repositories::{GuardedWrite, ImageRepo, PageRepo, UserRepo};

/// Which pages a read may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Back-office view: every page, drafts and scheduled ones included.
    Owner,
    /// Front-office view: only pages published on or before `as_of`.
    Public { as_of: Date },
}

impl Visibility {
    /// The date filter to bind into a query, `None` for no filter.
    pub fn as_of(self) -> Option<Date> {
        match self {
            Visibility::Owner => None,
            Visibility::Public { as_of } => Some(as_of),
        }
    }
}

#[async_trait]
pub trait PageStore: Send + Sync {
    async fn list_pages(&self, visibility: Visibility) -> Result<Vec<PageSummary>, CoreError>;

    /// Insert a page and its blocks atomically, returning the new id.
    async fn create_page(&self, page: &NewPage, blocks: &[BlockDraft]) -> Result<DbId, CoreError>;

    async fn get_page(&self, id: DbId) -> Result<Page, CoreError>;

    /// Page plus blocks in position order, as one consistent snapshot.
    /// Pages hidden by `visibility` are reported as `NotFound`.
    async fn get_page_with_blocks(
        &self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<PageWithBlocks, CoreError>;

    /// Replace metadata and the full block set. All or nothing.
    ///
    /// `expected_author` is the author the caller was authorized against.
    /// If the page has been reassigned since, nothing is written and the
    /// call fails with `Conflict`.
    async fn replace_page_and_blocks(
        &self,
        id: DbId,
        expected_author: DbId,
        meta: &PageMetadata,
        blocks: &[BlockDraft],
    ) -> Result<(), CoreError>;

    /// Delete a page and its blocks, returning the number of pages removed
    /// (`0` when it no longer exists). Guarded by `expected_author` like
    /// [`PageStore::replace_page_and_blocks`].
    async fn delete_page(&self, id: DbId, expected_author: DbId) -> Result<u64, CoreError>;

    async fn author_exists(&self, id: DbId) -> Result<bool, CoreError>;

    /// Paths of the image catalogue, for image block references.
    async fn image_paths(&self) -> Result<Vec<String>, CoreError>;
}

/// [`PageStore`] backed by the Postgres repositories.
#[derive(Debug, Clone)]
pub struct PgPageStore {
    pool: PgPool,
}

impl PgPageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_fault(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Page store query failed");
    CoreError::StorageFault(err.to_string())
}

fn page_not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Page", id }
}

fn page_reassigned(id: DbId, current: DbId) -> CoreError {
    tracing::warn!(page_id = id, current_author = current, "Page write refused, author changed");
    CoreError::Conflict(format!(
        "Page {id} was reassigned to user {current} while it was being changed"
    ))
}

#[async_trait]
impl PageStore for PgPageStore {
    async fn list_pages(&self, visibility: Visibility) -> Result<Vec<PageSummary>, CoreError> {
        PageRepo::list(&self.pool, visibility.as_of())
            .await
            .map_err(storage_fault)
    }

    async fn create_page(&self, page: &NewPage, blocks: &[BlockDraft]) -> Result<DbId, CoreError> {
        let created = PageRepo::create_with_blocks(&self.pool, page, blocks)
            .await
            .map_err(storage_fault)?;
        Ok(created.id)
    }

    async fn get_page(&self, id: DbId) -> Result<Page, CoreError> {
        PageRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_fault)?
            .ok_or_else(|| page_not_found(id))
    }

    async fn get_page_with_blocks(
        &self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<PageWithBlocks, CoreError> {
        PageRepo::find_with_blocks(&self.pool, id, visibility.as_of())
            .await
            .map_err(storage_fault)?
            .ok_or_else(|| page_not_found(id))
    }

    async fn replace_page_and_blocks(
        &self,
        id: DbId,
        expected_author: DbId,
        meta: &PageMetadata,
        blocks: &[BlockDraft],
    ) -> Result<(), CoreError> {
        match PageRepo::replace_with_blocks(&self.pool, id, expected_author, meta, blocks)
            .await
            .map_err(storage_fault)?
        {
            GuardedWrite::Written(_) => Ok(()),
            GuardedWrite::Missing => Err(page_not_found(id)),
            GuardedWrite::AuthorChanged { current } => Err(page_reassigned(id, current)),
        }
    }

    async fn delete_page(&self, id: DbId, expected_author: DbId) -> Result<u64, CoreError> {
        match PageRepo::delete(&self.pool, id, expected_author)
            .await
            .map_err(storage_fault)?
        {
            GuardedWrite::Written(deleted) => Ok(deleted),
            GuardedWrite::Missing => Ok(0),
            GuardedWrite::AuthorChanged { current } => Err(page_reassigned(id, current)),
        }
    }

    async fn author_exists(&self, id: DbId) -> Result<bool, CoreError> {
        UserRepo::exists(&self.pool, id).await.map_err(storage_fault)
    }

    async fn image_paths(&self) -> Result<Vec<String>, CoreError> {
        ImageRepo::list_paths(&self.pool).await.map_err(storage_fault)
    }
}
