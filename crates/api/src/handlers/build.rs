//! Handlers for builds: lookup, diff listing and ingestion, job status
//! updates, and the reviewer validation mutation.
//!
//! Read paths deliberately answer `{ "data": null }` for both a missing
//! build and a permission-denied build, so clients cannot distinguish
//! "not found" from "not permitted".

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use retina_core::build_status::resolve_build_status;
use retina_core::diff::validate_screenshot_diff;
use retina_core::error::CoreError;
use retina_core::status::{BuildStatus, JobStatus, NotificationKind, ValidationStatus};
use retina_core::types::{DbId, Timestamp};
use retina_db::models::build::{Build, CreateBuild};
use retina_db::models::repository::Repository;
use retina_db::models::screenshot_bucket::ScreenshotBucket;
use retina_db::models::screenshot_diff::CreateScreenshotDiff;
use retina_db::repositories::{
    BuildRepo, RepositoryRepo, ScreenshotBucketRepo, ScreenshotDiffRepo,
};
use retina_events::push_build_notification;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// A build as returned by the API: the stored row plus its resolved status
/// and the related repository and buckets.
#[derive(Debug, Serialize)]
pub struct BuildResponse {
    pub id: DbId,
    pub number: i32,
    pub base_screenshot_bucket_id: Option<DbId>,
    pub base_screenshot_bucket: Option<ScreenshotBucket>,
    pub compare_screenshot_bucket_id: DbId,
    pub compare_screenshot_bucket: ScreenshotBucket,
    pub repository: Repository,
    pub status: BuildStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a build.
#[derive(Debug, Deserialize)]
pub struct CreateBuildRequest {
    pub repository_id: DbId,
    pub compare_screenshot_bucket_id: DbId,
    /// Explicit baseline; when absent, the latest bucket of the
    /// repository's baseline branch is used.
    pub base_screenshot_bucket_id: Option<DbId>,
}

/// Request body for bulk diff ingestion.
#[derive(Debug, Deserialize)]
pub struct IngestDiffsRequest {
    pub diffs: Vec<CreateScreenshotDiff>,
}

/// Request body for updating a build's comparison job status.
#[derive(Debug, Deserialize)]
pub struct UpdateJobStatusRequest {
    pub job_status: JobStatus,
}

/// Request body for the validation mutation.
#[derive(Debug, Deserialize)]
pub struct SetValidationStatusRequest {
    pub validation_status: ValidationStatus,
}

/// GET /api/v1/builds/{build_id}
///
/// Build lookup with the resolved, validation-aware status. Anonymous
/// requests are allowed; they only see builds of public repositories.
pub async fn get_build(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<BuildResponse>>>> {
    let Some(build) = BuildRepo::find_by_id(&state.pool, build_id).await? else {
        return Ok(Json(DataResponse { data: None }));
    };

    let readable = RepositoryRepo::check_read_permission(
        &state.pool,
        build.repository_id,
        maybe_user.user_id(),
    )
    .await?;
    if !readable {
        return Ok(Json(DataResponse { data: None }));
    }

    let response = build_response(&state, build).await?;
    Ok(Json(DataResponse {
        data: Some(response),
    }))
}

/// GET /api/v1/builds/{build_id}/diffs
///
/// All diffs of a build in reviewer triage order (largest difference
/// first, compare-screenshot name as tie-break). No pagination.
pub async fn list_build_diffs(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<Vec<retina_db::models::screenshot_diff::ScreenshotDiff>>>>>
{
    let Some(build) = BuildRepo::find_by_id(&state.pool, build_id).await? else {
        return Ok(Json(DataResponse { data: None }));
    };

    let readable = RepositoryRepo::check_read_permission(
        &state.pool,
        build.repository_id,
        maybe_user.user_id(),
    )
    .await?;
    if !readable {
        return Ok(Json(DataResponse { data: None }));
    }

    let diffs = ScreenshotDiffRepo::list_for_build(&state.pool, build_id).await?;
    Ok(Json(DataResponse { data: Some(diffs) }))
}

/// POST /api/v1/builds
///
/// Create a build for a freshly uploaded compare bucket. Requires a right
/// on the target repository.
pub async fn create_build(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBuildRequest>,
) -> AppResult<impl IntoResponse> {
    let repository = RepositoryRepo::find_by_id(&state.pool, input.repository_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repository",
            id: input.repository_id,
        }))?;

    ensure_repository_right(&state, repository.id, auth.user_id).await?;

    let compare = ScreenshotBucketRepo::find_by_id(&state.pool, input.compare_screenshot_bucket_id)
        .await?
        .filter(|bucket| bucket.repository_id == repository.id)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "compare_screenshot_bucket_id does not belong to the repository".into(),
            ))
        })?;

    let base_bucket_id = match input.base_screenshot_bucket_id {
        Some(id) => {
            ScreenshotBucketRepo::find_by_id(&state.pool, id)
                .await?
                .filter(|bucket| bucket.repository_id == repository.id)
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(
                        "base_screenshot_bucket_id does not belong to the repository".into(),
                    ))
                })?;
            Some(id)
        }
        None => {
            // First build of the baseline branch has no baseline at all.
            ScreenshotBucketRepo::latest_for_branch(
                &state.pool,
                repository.id,
                &repository.baseline_branch,
            )
            .await?
            .filter(|bucket| bucket.id != compare.id)
            .map(|bucket| bucket.id)
        }
    };

    let build = BuildRepo::create(
        &state.pool,
        &CreateBuild {
            repository_id: repository.id,
            base_screenshot_bucket_id: base_bucket_id,
            compare_screenshot_bucket_id: compare.id,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        repository_id = repository.id,
        build_id = build.id,
        number = build.number,
        "Build created"
    );

    let response = build_response(&state, build).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/v1/builds/{build_id}/diffs
///
/// Bulk diff ingestion from a comparison run. Every diff is validated
/// before anything is persisted.
pub async fn ingest_diffs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
    Json(input): Json<IngestDiffsRequest>,
) -> AppResult<impl IntoResponse> {
    BuildRepo::find_by_id(&state.pool, build_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Build",
            id: build_id,
        }))?;

    ensure_build_right(&state, build_id, auth.user_id).await?;

    for diff in &input.diffs {
        validate_screenshot_diff(diff.base_screenshot_id, diff.compare_screenshot_id, diff.score)?;
    }

    let created = ScreenshotDiffRepo::create_many(&state.pool, build_id, &input.diffs).await?;

    tracing::info!(
        user_id = auth.user_id,
        build_id,
        count = created.len(),
        "Screenshot diffs ingested"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/builds/{build_id}/job-status
///
/// CI reports comparison job progress or completion.
pub async fn update_job_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
    Json(input): Json<UpdateJobStatusRequest>,
) -> AppResult<Json<DataResponse<Build>>> {
    ensure_build_right(&state, build_id, auth.user_id).await?;

    let build = BuildRepo::update_job_status(&state.pool, build_id, input.job_status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Build",
            id: build_id,
        }))?;

    Ok(Json(DataResponse { data: build }))
}

/// POST /api/v1/builds/{build_id}/validation-status
///
/// Set the validation status on all diffs of a build in one bulk patch,
/// then dispatch a `diff-accepted` / `diff-rejected` notification (nothing
/// for `unknown`). Returns the applied status.
///
/// The patch and the notification are not one transaction; a dispatch
/// failure surfaces after the patch has already committed.
pub async fn set_validation_status(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
    Json(input): Json<SetValidationStatusRequest>,
) -> AppResult<Json<DataResponse<ValidationStatus>>> {
    let Some(user) = maybe_user.0 else {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid user identification".into(),
        )));
    };

    // A missing build and an unrelated user are answered identically.
    let related = BuildRepo::get_user(&state.pool, build_id, user.user_id).await?;
    if related.is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Invalid user authorization".into(),
        )));
    }

    let status = input.validation_status;
    let patched =
        ScreenshotDiffRepo::set_validation_status_for_build(&state.pool, build_id, status).await?;

    tracing::info!(
        user_id = user.user_id,
        build_id,
        validation_status = status.as_str(),
        patched,
        "Validation status applied"
    );

    let kind = match status {
        ValidationStatus::Accepted => Some(NotificationKind::DiffAccepted),
        ValidationStatus::Rejected => Some(NotificationKind::DiffRejected),
        ValidationStatus::Unknown => None,
    };
    if let Some(kind) = kind {
        push_build_notification(&state.pool, &state.event_bus, build_id, kind).await?;
    }

    Ok(Json(DataResponse { data: status }))
}

/// Resolve the user's right on a build's repository, failing with the
/// mutation's authorization error when absent.
async fn ensure_build_right(
    state: &AppState,
    build_id: DbId,
    user_id: DbId,
) -> Result<(), AppError> {
    let related = BuildRepo::get_user(&state.pool, build_id, user_id).await?;
    if related.is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Invalid user authorization".into(),
        )));
    }
    Ok(())
}

/// Like [`ensure_build_right`], for a repository that has no build yet.
async fn ensure_repository_right(
    state: &AppState,
    repository_id: DbId,
    user_id: DbId,
) -> Result<(), AppError> {
    let allowed =
        RepositoryRepo::check_write_permission(&state.pool, repository_id, user_id).await?;
    if !allowed {
        return Err(AppError::Core(CoreError::Forbidden(
            "Invalid user authorization".into(),
        )));
    }
    Ok(())
}

/// Compose the API view of a build: related rows plus the resolved status
/// (`use_validation = true`, matching the review UI semantics).
async fn build_response(state: &AppState, build: Build) -> Result<BuildResponse, AppError> {
    let repository = RepositoryRepo::find_by_id(&state.pool, build.repository_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "build {} references missing repository {}",
                build.id, build.repository_id
            ))
        })?;

    let compare_screenshot_bucket =
        ScreenshotBucketRepo::find_by_id(&state.pool, build.compare_screenshot_bucket_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "build {} references missing compare bucket {}",
                    build.id, build.compare_screenshot_bucket_id
                ))
            })?;

    let base_screenshot_bucket = match build.base_screenshot_bucket_id {
        Some(id) => ScreenshotBucketRepo::find_by_id(&state.pool, id).await?,
        None => None,
    };

    let job_status = build.job_status().map_err(AppError::Core)?;

    let diffs = ScreenshotDiffRepo::list_for_build(&state.pool, build.id).await?;
    let diff_states = diffs
        .iter()
        .map(|diff| diff.state())
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::Core)?;

    let status = resolve_build_status(job_status, &diff_states, true);

    Ok(BuildResponse {
        id: build.id,
        number: build.number,
        base_screenshot_bucket_id: build.base_screenshot_bucket_id,
        base_screenshot_bucket,
        compare_screenshot_bucket_id: build.compare_screenshot_bucket_id,
        compare_screenshot_bucket,
        repository,
        status,
        created_at: build.created_at,
        updated_at: build.updated_at,
    })
}
