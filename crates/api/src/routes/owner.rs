//! Route definitions for owners, merged into `/owners`.

use axum::routing::get;
use axum::Router;

use crate::handlers::owner;
use crate::state::AppState;

/// Owner routes.
///
/// ```text
/// GET    /{login}                 get_owner
/// GET    /{login}/repositories    list_owner_repositories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{login}", get(owner::get_owner))
        .route("/{login}/repositories", get(owner::list_owner_repositories))
}
