//! Repository for the `blocks` table.
//!
//! Blocks are never written on their own: inserts and deletes happen inside
//! the page transaction opened by [`super::PageRepo`].

use folio_core::blocks::BlockDraft;
use folio_core::types::DbId;
use sqlx::{Postgres, Transaction};

pub struct BlockRepo;

impl BlockRepo {
    /// Insert `blocks` for `page_id` within an existing transaction.
    pub async fn insert_all_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        page_id: DbId,
        blocks: &[BlockDraft],
    ) -> Result<(), sqlx::Error> {
        for block in blocks {
            sqlx::query(
                "INSERT INTO blocks (page_id, block_type, content, position)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(page_id)
            .bind(block.block_type.as_str())
            .bind(&block.content)
            .bind(block.position)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Delete every block of `page_id` within an existing transaction.
    pub async fn delete_for_page_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        page_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blocks WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
