//! Repository for the `pages` table.
//!
//! Visibility is expressed as an optional `as_of` date bound into the
//! statement: `None` sees every page, `Some(day)` only pages published on
//! or before `day`. Drafts never match a date filter because comparing a
//! NULL publication date yields NULL.
//!
//! Replace and delete take the author the caller authorized against and
//! compare it with the locked row, so a write decided on a stale read of the
//! page is refused instead of applied.

use folio_core::blocks::BlockDraft;
use folio_core::types::{Date, DbId};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::BlockRepo;
use crate::models::block::Block;
use crate::models::page::{NewPage, Page, PageMetadata, PageSummary, PageWithBlocks};

const COLUMNS: &str = "id, author_id, title, creation_date, publication_date, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "p.id, p.author_id, u.name AS author_name, p.title, \
                               p.creation_date, p.publication_date";

/// One row of the page/blocks join. Block columns are NULL for a page
/// without blocks.
#[derive(FromRow)]
struct PageBlockRow {
    id: DbId,
    author_id: DbId,
    author_name: String,
    title: String,
    creation_date: Date,
    publication_date: Option<Date>,
    block_id: Option<DbId>,
    block_type: Option<String>,
    content: Option<String>,
    position: Option<i32>,
}

/// Outcome of a write guarded by the page's current author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardedWrite<T> {
    Written(T),
    /// No page with that id; nothing was changed.
    Missing,
    /// The page now belongs to `current`; nothing was changed.
    AuthorChanged { current: DbId },
}

pub struct PageRepo;

impl PageRepo {
    /// Page summaries ordered by creation date, then id.
    pub async fn list(pool: &PgPool, as_of: Option<Date>) -> Result<Vec<PageSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM pages p
             JOIN users u ON u.id = p.author_id
             WHERE ($1::date IS NULL OR p.publication_date <= $1)
             ORDER BY p.creation_date ASC, p.id ASC"
        );
        sqlx::query_as::<_, PageSummary>(&query)
            .bind(as_of)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page and blocks read with a single statement, blocks in position order.
    ///
    /// Returns `None` when the page does not exist or is not visible at `as_of`.
    pub async fn find_with_blocks(
        pool: &PgPool,
        id: DbId,
        as_of: Option<Date>,
    ) -> Result<Option<PageWithBlocks>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS},
                    b.id AS block_id, b.block_type, b.content, b.position
             FROM pages p
             JOIN users u ON u.id = p.author_id
             LEFT JOIN blocks b ON b.page_id = p.id
             WHERE p.id = $1
               AND ($2::date IS NULL OR p.publication_date <= $2)
             ORDER BY b.position ASC"
        );
        let rows = sqlx::query_as::<_, PageBlockRow>(&query)
            .bind(id)
            .bind(as_of)
            .fetch_all(pool)
            .await?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };
        let page = PageSummary {
            id: first.id,
            author_id: first.author_id,
            author_name: first.author_name.clone(),
            title: first.title.clone(),
            creation_date: first.creation_date,
            publication_date: first.publication_date,
        };
        let blocks = rows
            .into_iter()
            .filter_map(|row| {
                Some(Block {
                    id: row.block_id?,
                    page_id: row.id,
                    block_type: row.block_type?,
                    content: row.content?,
                    position: row.position?,
                })
            })
            .collect();

        Ok(Some(PageWithBlocks { page, blocks }))
    }

    /// Insert a page and its blocks in one transaction.
    pub async fn create_with_blocks(
        pool: &PgPool,
        input: &NewPage,
        blocks: &[BlockDraft],
    ) -> Result<Page, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO pages (author_id, title, creation_date, publication_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(input.creation_date)
            .bind(input.publication_date)
            .fetch_one(&mut *tx)
            .await?;

        BlockRepo::insert_all_in_tx(&mut tx, page.id, blocks).await?;

        tx.commit().await?;
        Ok(page)
    }

    /// Replace a page's metadata and its whole block set atomically.
    ///
    /// The page row is locked first, so two replaces of the same page run
    /// one after the other. The write only happens when the locked row is
    /// still authored by `expected_author`. Any failure after the lock drops
    /// the transaction uncommitted, leaving the previous content in place.
    pub async fn replace_with_blocks(
        pool: &PgPool,
        id: DbId,
        expected_author: DbId,
        meta: &PageMetadata,
        blocks: &[BlockDraft],
    ) -> Result<GuardedWrite<Page>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        match Self::lock_author(&mut tx, id).await? {
            None => return Ok(GuardedWrite::Missing),
            Some(current) if current != expected_author => {
                return Ok(GuardedWrite::AuthorChanged { current })
            }
            Some(_) => {}
        }

        BlockRepo::delete_for_page_in_tx(&mut tx, id).await?;

        let query = format!(
            "UPDATE pages SET author_id = $2, title = $3, publication_date = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(meta.author_id)
            .bind(&meta.title)
            .bind(meta.publication_date)
            .fetch_one(&mut *tx)
            .await?;

        BlockRepo::insert_all_in_tx(&mut tx, id, blocks).await?;

        tx.commit().await?;
        Ok(GuardedWrite::Written(page))
    }

    /// Delete a page still authored by `expected_author`; its blocks go with
    /// it (`ON DELETE CASCADE`). Returns the number of pages removed.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        expected_author: DbId,
    ) -> Result<GuardedWrite<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        match Self::lock_author(&mut tx, id).await? {
            None => return Ok(GuardedWrite::Missing),
            Some(current) if current != expected_author => {
                return Ok(GuardedWrite::AuthorChanged { current })
            }
            Some(_) => {}
        }

        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(GuardedWrite::Written(result.rows_affected()))
    }

    /// Lock the page row for the rest of `tx` and return its author.
    async fn lock_author(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT author_id FROM pages WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }
}
