//! Route definitions for builds, merged into `/builds`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::build;
use crate::state::AppState;

/// Build routes.
///
/// ```text
/// POST   /                                create_build
/// GET    /{build_id}                      get_build
/// GET    /{build_id}/diffs                list_build_diffs
/// POST   /{build_id}/diffs                ingest_diffs
/// POST   /{build_id}/job-status           update_job_status
/// POST   /{build_id}/validation-status    set_validation_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(build::create_build))
        .route("/{build_id}", get(build::get_build))
        .route(
            "/{build_id}/diffs",
            get(build::list_build_diffs).post(build::ingest_diffs),
        )
        .route("/{build_id}/job-status", post(build::update_job_status))
        .route(
            "/{build_id}/validation-status",
            post(build::set_validation_status),
        )
}
