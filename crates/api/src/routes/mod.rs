pub mod admin;
pub mod auth;
pub mod health;
pub mod images;
pub mod pages;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                  login (public)
/// /auth/refresh                refresh (public)
/// /auth/logout                 logout (auth)
/// /auth/me                     current user (auth)
///
/// /pages                       list all (auth), create (auth)
/// /pages/published             list published (public)
/// /pages/{id}                  get (public or auth), replace, delete (auth)
///
/// /images                      image catalogue (auth)
///
/// /site                        get (public), set name (admin)
///
/// /admin/users                 list users (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/pages", pages::router())
        .nest("/images", images::router())
        .nest("/site", site::router())
        .nest("/admin", admin::router())
}
