//! Handlers for owners (users or organizations) and their repository lists.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use retina_core::types::{DbId, Timestamp};
use retina_db::models::repository::{OwnerRef, Repository};
use retina_db::repositories::{OrganizationRepo, RepositoryRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// An owner as returned by the API: a user or an organization, flattened
/// into one shape.
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub id: DbId,
    pub login: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub owner_type: &'static str,
    pub created_at: Timestamp,
}

/// Resolve a login to an owner. Users shadow organizations on collision.
async fn resolve_owner(
    state: &AppState,
    login: &str,
) -> Result<Option<(OwnerRef, OwnerResponse)>, sqlx::Error> {
    if let Some(user) = UserRepo::find_by_login(&state.pool, login).await? {
        return Ok(Some((
            OwnerRef::User(user.id),
            OwnerResponse {
                id: user.id,
                login: user.login,
                name: user.name,
                owner_type: "user",
                created_at: user.created_at,
            },
        )));
    }

    if let Some(org) = OrganizationRepo::find_by_login(&state.pool, login).await? {
        return Ok(Some((
            OwnerRef::Organization(org.id),
            OwnerResponse {
                id: org.id,
                login: org.login,
                name: org.name,
                owner_type: "organization",
                created_at: org.created_at,
            },
        )));
    }

    Ok(None)
}

/// GET /api/v1/owners/{login}
///
/// Owner lookup; unknown logins answer `{ "data": null }`.
pub async fn get_owner(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<Json<DataResponse<Option<OwnerResponse>>>> {
    let owner = resolve_owner(&state, &login).await?;
    Ok(Json(DataResponse {
        data: owner.map(|(_, response)| response),
    }))
}

/// GET /api/v1/owners/{login}/repositories
///
/// The owner's repositories filtered down to exactly those the requester
/// may read; anonymous requesters see only the public ones.
pub async fn list_owner_repositories(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<Json<DataResponse<Option<Vec<Repository>>>>> {
    let Some((owner_ref, _)) = resolve_owner(&state, &login).await? else {
        return Ok(Json(DataResponse { data: None }));
    };

    let repositories =
        RepositoryRepo::list_readable_by_owner(&state.pool, owner_ref, maybe_user.user_id())
            .await?;
    Ok(Json(DataResponse {
        data: Some(repositories),
    }))
}
