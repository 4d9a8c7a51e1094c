//! Handlers for the site display name.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::site::normalize_site_name;
use folio_db::models::site::SiteSettings;
use folio_db::repositories::SiteRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SiteNameRequest {
    pub name: String,
}

/// GET /api/v1/site
pub async fn get_site(State(state): State<AppState>) -> AppResult<Json<DataResponse<SiteSettings>>> {
    let site = SiteRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: site }))
}

/// PUT /api/v1/site (admin only)
pub async fn set_site_name(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<SiteNameRequest>,
) -> AppResult<StatusCode> {
    let name = normalize_site_name(&input.name)?;
    SiteRepo::set_name(&state.pool, &name).await?;
    tracing::info!(actor_id = admin.user_id, site_name = %name, "Site name changed");
    Ok(StatusCode::NO_CONTENT)
}
