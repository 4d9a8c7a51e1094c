use axum::extract::State;
use axum::Json;
use folio_db::models::image::Image;
use folio_db::repositories::ImageRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/images
///
/// The catalogue an editor picks image block paths from.
pub async fn list_images(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Image>>>> {
    let images = ImageRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: images }))
}
