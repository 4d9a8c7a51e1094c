use axum::extract::State;
use axum::Json;
use folio_db::models::user::UserResponse;
use folio_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users
///
/// Lets an admin pick the author of a page.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_responses(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}
