use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(site::get_site).put(site::set_site_name))
}
