//! Seed helpers shared by the persistence integration tests.

use retina_core::types::DbId;
use retina_db::models::organization::CreateOrganization;
use retina_db::models::repository::{CreateRepository, OwnerRef, Repository};
use retina_db::models::screenshot::{CreateScreenshot, Screenshot};
use retina_db::models::screenshot_bucket::CreateScreenshotBucket;
use retina_db::models::user::{CreateUser, User};
use retina_db::repositories::{
    OrganizationRepo, RepositoryRepo, ScreenshotBucketRepo, ScreenshotRepo, UserRepo,
};
use sqlx::PgPool;

pub async fn seed_user(pool: &PgPool, login: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            login: login.to_string(),
            name: None,
            email: None,
        },
    )
    .await
    .expect("user insert should succeed")
}

pub async fn seed_user_repository(
    pool: &PgPool,
    owner: &User,
    name: &str,
    private: bool,
) -> Repository {
    RepositoryRepo::create(
        pool,
        OwnerRef::User(owner.id),
        &CreateRepository {
            name: name.to_string(),
            private,
            baseline_branch: None,
        },
    )
    .await
    .expect("repository insert should succeed")
}

pub async fn seed_org_repository(
    pool: &PgPool,
    org_login: &str,
    name: &str,
    private: bool,
) -> (DbId, Repository) {
    let org = OrganizationRepo::create(
        pool,
        &CreateOrganization {
            login: org_login.to_string(),
            name: None,
        },
    )
    .await
    .expect("organization insert should succeed");

    let repository = RepositoryRepo::create(
        pool,
        OwnerRef::Organization(org.id),
        &CreateRepository {
            name: name.to_string(),
            private,
            baseline_branch: None,
        },
    )
    .await
    .expect("repository insert should succeed");

    (org.id, repository)
}

/// Create a bucket with the given screenshots, returning the bucket id and
/// the created screenshot rows in input order.
pub async fn seed_bucket(
    pool: &PgPool,
    repository_id: DbId,
    branch: &str,
    screenshot_names: &[&str],
) -> (DbId, Vec<Screenshot>) {
    let bucket = ScreenshotBucketRepo::create(
        pool,
        &CreateScreenshotBucket {
            name: "default".to_string(),
            commit_sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
            branch: branch.to_string(),
            repository_id,
        },
    )
    .await
    .expect("bucket insert should succeed");

    let inputs: Vec<CreateScreenshot> = screenshot_names
        .iter()
        .map(|name| CreateScreenshot {
            name: name.to_string(),
            s3_id: format!("s3/{name}"),
        })
        .collect();

    let screenshots = ScreenshotRepo::create_many(pool, bucket.id, &inputs)
        .await
        .expect("screenshot inserts should succeed");

    (bucket.id, screenshots)
}
