//! Page create/update/delete orchestration.
//!
//! Every mutating call runs its checks in a fixed order and touches the
//! store only once all of them pass:
//!
//! 1. the page exists (update, delete)
//! 2. the actor may act on it
//! 3. the target author exists
//! 4. the publication date is not before the creation date
//! 5. title and block content are valid
//!
//! Steps 1-4 stop at the first failure. Step 5 reports every content
//! violation at once. Image block paths are trimmed before step 5.
//!
//! Updates and deletes hand the author seen in step 1 to the store, which
//! refuses the write with `Conflict` if the page was reassigned meanwhile.

use std::sync::Arc;

use folio_core::blocks::{
    find_unknown_images, trim_image_paths, validate_blocks, BlockDraft, BlockType,
};
use folio_core::error::CoreError;
use folio_core::page_status::PageStatus;
use folio_core::pages::{
    authorize_create, authorize_delete, authorize_update, check_publication_date, validate_title,
    Actor,
};
use folio_core::types::{Date, DbId};
use folio_db::models::block::Block;
use folio_db::models::page::{NewPage, PageMetadata, PageSummary};
use folio_db::{PageStore, Visibility};
use serde::Serialize;

/// A full page as submitted for create or update.
#[derive(Debug, Clone)]
pub struct PageInput {
    pub title: String,
    pub author_id: DbId,
    pub publication_date: Option<Date>,
    pub blocks: Vec<BlockDraft>,
}

/// A listing entry with its derived status.
#[derive(Debug, Clone, Serialize)]
pub struct PageListItem {
    #[serde(flatten)]
    pub page: PageSummary,
    pub status: PageStatus,
}

/// A single page with its blocks and derived status.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    #[serde(flatten)]
    pub page: PageSummary,
    pub status: PageStatus,
    pub blocks: Vec<Block>,
}

#[derive(Clone)]
pub struct PageService {
    store: Arc<dyn PageStore>,
}

impl PageService {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    /// Every page for an authenticated actor, published ones otherwise.
    pub async fn list_pages(
        &self,
        actor: Option<&Actor>,
        today: Date,
    ) -> Result<Vec<PageListItem>, CoreError> {
        let pages = self.store.list_pages(visibility_for(actor, today)).await?;
        Ok(pages
            .into_iter()
            .map(|page| PageListItem {
                status: page.status(today),
                page,
            })
            .collect())
    }

    /// A page with its blocks. Anonymous callers only see published pages;
    /// anything else is reported as not found.
    pub async fn get_page(
        &self,
        actor: Option<&Actor>,
        page_id: DbId,
        today: Date,
    ) -> Result<PageView, CoreError> {
        let found = self
            .store
            .get_page_with_blocks(page_id, visibility_for(actor, today))
            .await?;
        Ok(PageView {
            status: found.page.status(today),
            page: found.page,
            blocks: found.blocks,
        })
    }

    /// Create a page dated `today` together with its blocks.
    pub async fn create_page(
        &self,
        actor: &Actor,
        input: PageInput,
        today: Date,
    ) -> Result<DbId, CoreError> {
        authorize_create(actor, input.author_id)?;
        self.ensure_author(input.author_id).await?;
        check_publication_date(today, input.publication_date)?;
        validate_title(&input.title)?;
        let blocks = trim_image_paths(input.blocks);
        self.check_content(&blocks).await?;

        let new_page = NewPage {
            author_id: input.author_id,
            title: input.title.trim().to_string(),
            creation_date: today,
            publication_date: input.publication_date,
        };
        let page_id = self.store.create_page(&new_page, &blocks).await?;

        tracing::info!(
            actor_id = actor.user_id,
            page_id,
            author_id = new_page.author_id,
            block_count = blocks.len(),
            "Page created"
        );
        Ok(page_id)
    }

    /// Replace a page's metadata and full block set.
    pub async fn update_page(
        &self,
        actor: &Actor,
        page_id: DbId,
        input: PageInput,
    ) -> Result<(), CoreError> {
        let current = self.store.get_page(page_id).await?;
        authorize_update(actor, current.author_id, input.author_id)?;
        if input.author_id != current.author_id {
            self.ensure_author(input.author_id).await?;
        }
        check_publication_date(current.creation_date, input.publication_date)?;
        validate_title(&input.title)?;
        let blocks = trim_image_paths(input.blocks);
        self.check_content(&blocks).await?;

        let meta = PageMetadata {
            author_id: input.author_id,
            title: input.title.trim().to_string(),
            publication_date: input.publication_date,
        };
        self.store
            .replace_page_and_blocks(page_id, current.author_id, &meta, &blocks)
            .await?;

        tracing::info!(
            actor_id = actor.user_id,
            page_id,
            author_id = meta.author_id,
            block_count = blocks.len(),
            "Page updated"
        );
        Ok(())
    }

    /// Delete a page and its blocks. Returns the number of pages removed.
    pub async fn delete_page(&self, actor: &Actor, page_id: DbId) -> Result<u64, CoreError> {
        let current = self.store.get_page(page_id).await?;
        authorize_delete(actor, current.author_id)?;

        let deleted = self.store.delete_page(page_id, current.author_id).await?;
        tracing::info!(actor_id = actor.user_id, page_id, deleted, "Page deleted");
        Ok(deleted)
    }

    async fn ensure_author(&self, author_id: DbId) -> Result<(), CoreError> {
        if self.store.author_exists(author_id).await? {
            Ok(())
        } else {
            Err(CoreError::InvalidAuthor(author_id))
        }
    }

    /// Structural rules plus image references, all violations together.
    async fn check_content(&self, blocks: &[BlockDraft]) -> Result<(), CoreError> {
        let mut violations = validate_blocks(blocks).err().unwrap_or_default();

        if blocks.iter().any(|b| b.block_type == BlockType::Image) {
            let known = self.store.image_paths().await?;
            violations.extend(find_unknown_images(blocks, &known));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidContent(violations))
        }
    }
}

fn visibility_for(actor: Option<&Actor>, today: Date) -> Visibility {
    match actor {
        Some(_) => Visibility::Owner,
        None => Visibility::Public { as_of: today },
    }
}
