use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the admin role.
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(users::list_users))
}
