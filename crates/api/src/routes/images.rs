use axum::routing::get;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(images::list_images))
}
