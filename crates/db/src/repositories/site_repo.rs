//! Repository for the single-row `site_settings` table.

use sqlx::PgPool;

use crate::models::site::SiteSettings;

pub struct SiteRepo;

impl SiteRepo {
    pub async fn get(pool: &PgPool) -> Result<SiteSettings, sqlx::Error> {
        sqlx::query_as::<_, SiteSettings>(
            "SELECT site_name, updated_at FROM site_settings WHERE id = 1",
        )
        .fetch_one(pool)
        .await
    }

    /// Overwrite the site name. The row is seeded by migration, so an upsert
    /// only matters for a database that was emptied by hand.
    pub async fn set_name(pool: &PgPool, name: &str) -> Result<SiteSettings, sqlx::Error> {
        sqlx::query_as::<_, SiteSettings>(
            "INSERT INTO site_settings (id, site_name) VALUES (1, $1)
             ON CONFLICT (id) DO UPDATE SET site_name = EXCLUDED.site_name
             RETURNING site_name, updated_at",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }
}
