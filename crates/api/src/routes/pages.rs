use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET    /            -> list_pages (auth)
/// POST   /            -> create_page (auth)
/// GET    /published   -> list_published
/// GET    /{id}        -> get_page
/// PUT    /{id}        -> update_page (auth)
/// DELETE /{id}        -> delete_page (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages).post(pages::create_page))
        .route("/published", get(pages::list_published))
        .route(
            "/{id}",
            get(pages::get_page)
                .put(pages::update_page)
                .delete(pages::delete_page),
        )
}
