pub mod build;
pub mod health;
pub mod owner;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /builds                                  create (requires auth + right)
/// /builds/{build_id}                       build with resolved status
/// /builds/{build_id}/diffs                 diff listing (GET), ingestion (POST)
/// /builds/{build_id}/job-status            CI job status update (POST)
/// /builds/{build_id}/validation-status     reviewer validation mutation (POST)
///
/// /owners/{login}                          owner lookup
/// /owners/{login}/repositories             readable repositories of an owner
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/builds", build::router())
        .nest("/owners", owner::router())
}
