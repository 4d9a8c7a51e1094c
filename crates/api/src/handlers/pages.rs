//! Handlers for the `/pages` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::blocks::BlockDraft;
use folio_core::pages::TITLE_MAX_LEN;
use folio_core::types::{Date, DbId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::services::{today_utc, PageInput, PageListItem, PageView};
use crate::state::AppState;

/// Body of `POST /pages` and `PUT /pages/{id}`.
///
/// `author_id` defaults to the caller. Block rules are checked by the page
/// service so every violation is reported together.
#[derive(Debug, Deserialize, Validate)]
pub struct PageRequest {
    #[validate(length(max = TITLE_MAX_LEN, message = "Title is too long"))]
    pub title: String,
    pub author_id: Option<DbId>,
    pub publication_date: Option<Date>,
    pub blocks: Vec<BlockDraft>,
}

impl PageRequest {
    fn into_input(self, caller: DbId) -> PageInput {
        PageInput {
            title: self.title,
            author_id: self.author_id.unwrap_or(caller),
            publication_date: self.publication_date,
            blocks: self.blocks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedPage {
    pub id: DbId,
}

#[derive(Debug, Serialize)]
pub struct DeletedPage {
    pub deleted: u64,
}

/// GET /api/v1/pages
pub async fn list_pages(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<PageListItem>>>> {
    let actor = user.actor();
    let pages = state.pages.list_pages(Some(&actor), today_utc()).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /api/v1/pages/published
pub async fn list_published(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PageListItem>>>> {
    let pages = state.pages.list_pages(None, today_utc()).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /api/v1/pages/{id}
///
/// With a token: any page (back-office view). Without: published pages only.
pub async fn get_page(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let actor = user.map(|u| u.actor());
    let page = state.pages.get_page(actor.as_ref(), id, today_utc()).await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/pages
pub async fn create_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<PageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedPage>>)> {
    input.validate()?;
    let id = state
        .pages
        .create_page(&user.actor(), input.into_input(user.user_id), today_utc())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: CreatedPage { id } })))
}

/// PUT /api/v1/pages/{id}
pub async fn update_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<PageRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    state
        .pages
        .update_page(&user.actor(), id, input.into_input(user.user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/pages/{id}
pub async fn delete_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeletedPage>>> {
    let deleted = state.pages.delete_page(&user.actor(), id).await?;
    Ok(Json(DataResponse {
        data: DeletedPage { deleted },
    }))
}
