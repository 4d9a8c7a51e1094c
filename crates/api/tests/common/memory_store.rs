//! In-memory `PageStore` for service tests, with fault injection on replace.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::blocks::BlockDraft;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::block::Block;
use folio_db::models::page::{NewPage, Page, PageMetadata, PageSummary, PageWithBlocks};
use folio_db::{PageStore, Visibility};

#[derive(Debug, Clone, Default)]
struct Data {
    next_id: DbId,
    /// user id -> display name
    users: HashMap<DbId, String>,
    pages: BTreeMap<DbId, Page>,
    blocks: HashMap<DbId, Vec<Block>>,
}

impl Data {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn store_blocks(&mut self, page_id: DbId, drafts: &[BlockDraft]) {
        let mut blocks: Vec<Block> = drafts
            .iter()
            .map(|d| Block {
                id: self.next_id(),
                page_id,
                block_type: d.block_type.as_str().to_string(),
                content: d.content.clone(),
                position: d.position,
            })
            .collect();
        blocks.sort_by_key(|b| b.position);
        self.blocks.insert(page_id, blocks);
    }

    fn summary(&self, page: &Page) -> PageSummary {
        PageSummary {
            id: page.id,
            author_id: page.author_id,
            author_name: self.users.get(&page.author_id).cloned().unwrap_or_default(),
            title: page.title.clone(),
            creation_date: page.creation_date,
            publication_date: page.publication_date,
        }
    }
}

fn visible(page: &Page, visibility: Visibility) -> bool {
    match visibility.as_of() {
        None => true,
        Some(as_of) => page.publication_date.is_some_and(|d| d <= as_of),
    }
}

#[derive(Default)]
pub struct MemoryPageStore {
    data: Mutex<Data>,
    images: Vec<String>,
    fail_replace: AtomicBool,
    /// Author given to the page right after the next `get_page` returns.
    reassign_after_read: Mutex<Option<DbId>>,
}

impl MemoryPageStore {
    pub fn new(images: &[&str]) -> Self {
        Self {
            images: images.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn add_user(&self, name: &str) -> DbId {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        data.users.insert(id, name.to_string());
        id
    }

    /// Make every following replace fail after its blocks were deleted.
    pub fn fail_replaces(&self, fail: bool) {
        self.fail_replace.store(fail, Ordering::SeqCst);
    }

    /// Hand the page to `author_id` right after the next `get_page`, the way
    /// a concurrent admin edit would land between a read and a write.
    pub fn reassign_after_next_read(&self, author_id: DbId) {
        *self.reassign_after_read.lock().unwrap() = Some(author_id);
    }

    pub fn page_count(&self) -> usize {
        self.data.lock().unwrap().pages.len()
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Page", id }
}

fn reassigned(id: DbId) -> CoreError {
    CoreError::Conflict(format!("Page {id} was reassigned"))
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn list_pages(&self, visibility: Visibility) -> Result<Vec<PageSummary>, CoreError> {
        let data = self.data.lock().unwrap();
        let mut pages: Vec<&Page> = data
            .pages
            .values()
            .filter(|p| visible(p, visibility))
            .collect();
        pages.sort_by_key(|p| (p.creation_date, p.id));
        Ok(pages.into_iter().map(|p| data.summary(p)).collect())
    }

    async fn create_page(&self, page: &NewPage, blocks: &[BlockDraft]) -> Result<DbId, CoreError> {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        let now = Utc::now();
        data.pages.insert(
            id,
            Page {
                id,
                author_id: page.author_id,
                title: page.title.clone(),
                creation_date: page.creation_date,
                publication_date: page.publication_date,
                created_at: now,
                updated_at: now,
            },
        );
        data.store_blocks(id, blocks);
        Ok(id)
    }

    async fn get_page(&self, id: DbId) -> Result<Page, CoreError> {
        let mut data = self.data.lock().unwrap();
        let page = data.pages.get(&id).cloned().ok_or_else(|| not_found(id))?;
        if let Some(author_id) = self.reassign_after_read.lock().unwrap().take() {
            if let Some(stored) = data.pages.get_mut(&id) {
                stored.author_id = author_id;
            }
        }
        Ok(page)
    }

    async fn get_page_with_blocks(
        &self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<PageWithBlocks, CoreError> {
        let data = self.data.lock().unwrap();
        let page = data
            .pages
            .get(&id)
            .filter(|p| visible(p, visibility))
            .ok_or_else(|| not_found(id))?;
        Ok(PageWithBlocks {
            page: data.summary(page),
            blocks: data.blocks.get(&id).cloned().unwrap_or_default(),
        })
    }

    async fn replace_page_and_blocks(
        &self,
        id: DbId,
        expected_author: DbId,
        meta: &PageMetadata,
        blocks: &[BlockDraft],
    ) -> Result<(), CoreError> {
        let mut data = self.data.lock().unwrap();
        let current = data.pages.get(&id).ok_or_else(|| not_found(id))?.author_id;
        if current != expected_author {
            return Err(reassigned(id));
        }

        // Work on a copy and swap it in only on success.
        let mut staged = data.clone();
        staged.blocks.remove(&id);
        if let Some(page) = staged.pages.get_mut(&id) {
            page.author_id = meta.author_id;
            page.title = meta.title.clone();
            page.publication_date = meta.publication_date;
            page.updated_at = Utc::now();
        }
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(CoreError::StorageFault("injected failure".into()));
        }
        staged.store_blocks(id, blocks);

        *data = staged;
        Ok(())
    }

    async fn delete_page(&self, id: DbId, expected_author: DbId) -> Result<u64, CoreError> {
        let mut data = self.data.lock().unwrap();
        match data.pages.get(&id) {
            None => return Ok(0),
            Some(page) if page.author_id != expected_author => return Err(reassigned(id)),
            Some(_) => {}
        }
        data.blocks.remove(&id);
        data.pages.remove(&id);
        Ok(1)
    }

    async fn author_exists(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.data.lock().unwrap().users.contains_key(&id))
    }

    async fn image_paths(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.images.clone())
    }
}
