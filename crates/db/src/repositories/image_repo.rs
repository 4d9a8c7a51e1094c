//! Repository for the read-only `images` catalogue.

use sqlx::PgPool;

use crate::models::image::Image;

pub struct ImageRepo;

impl ImageRepo {
    /// Every catalogue entry ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Image>, sqlx::Error> {
        sqlx::query_as::<_, Image>("SELECT id, name, path FROM images ORDER BY name ASC, id ASC")
            .fetch_all(pool)
            .await
    }

    /// Just the paths, for checking image block references.
    pub async fn list_paths(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT path FROM images")
            .fetch_all(pool)
            .await
    }
}
