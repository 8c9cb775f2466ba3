//! Persistence tests for build number allocation, diff triage ordering, and
//! the bulk validation patch.

mod common;

use common::{seed_bucket, seed_user, seed_user_repository};
use retina_core::status::ValidationStatus;
use retina_db::models::build::CreateBuild;
use retina_db::models::screenshot_diff::CreateScreenshotDiff;
use retina_db::repositories::{BuildRepo, RepositoryRepo, ScreenshotDiffRepo};
use sqlx::PgPool;

#[sqlx::test]
async fn test_build_numbers_increment_per_repository(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let repo_a = seed_user_repository(&pool, &owner, "web", true).await;
    let repo_b = seed_user_repository(&pool, &owner, "docs", true).await;
    let (bucket_a, _) = seed_bucket(&pool, repo_a.id, "master", &[]).await;
    let (bucket_b, _) = seed_bucket(&pool, repo_b.id, "master", &[]).await;

    let first = BuildRepo::create(
        &pool,
        &CreateBuild {
            repository_id: repo_a.id,
            base_screenshot_bucket_id: None,
            compare_screenshot_bucket_id: bucket_a,
        },
    )
    .await
    .unwrap();
    assert_eq!(first.number, 1, "first build of a repository is number 1");
    assert!(first.base_screenshot_bucket_id.is_none());

    let second = BuildRepo::create(
        &pool,
        &CreateBuild {
            repository_id: repo_a.id,
            base_screenshot_bucket_id: Some(bucket_a),
            compare_screenshot_bucket_id: bucket_a,
        },
    )
    .await
    .unwrap();
    assert_eq!(second.number, 2);

    // Numbers are scoped to the repository, not global.
    let other = BuildRepo::create(
        &pool,
        &CreateBuild {
            repository_id: repo_b.id,
            base_screenshot_bucket_id: None,
            compare_screenshot_bucket_id: bucket_b,
        },
    )
    .await
    .unwrap();
    assert_eq!(other.number, 1);
}

#[sqlx::test]
async fn test_diffs_ordered_by_score_then_compare_name(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let repo = seed_user_repository(&pool, &owner, "web", true).await;
    let (base_bucket, base_shots) =
        seed_bucket(&pool, repo.id, "master", &["home", "login", "settings"]).await;
    let (compare_bucket, compare_shots) =
        seed_bucket(&pool, repo.id, "feature", &["home", "login", "settings"]).await;

    let build = BuildRepo::create(
        &pool,
        &CreateBuild {
            repository_id: repo.id,
            base_screenshot_bucket_id: Some(base_bucket),
            compare_screenshot_bucket_id: compare_bucket,
        },
    )
    .await
    .unwrap();

    // Insert out of triage order on purpose.
    for (base, compare, score) in [
        (base_shots[0].id, compare_shots[0].id, Some(0.0)),
        (base_shots[1].id, compare_shots[1].id, Some(0.3)),
        (base_shots[2].id, compare_shots[2].id, None),
    ] {
        ScreenshotDiffRepo::create(
            &pool,
            build.id,
            &CreateScreenshotDiff {
                base_screenshot_id: Some(base),
                compare_screenshot_id: compare,
                score,
                s3_id: None,
            },
        )
        .await
        .unwrap();
    }

    let diffs = ScreenshotDiffRepo::list_for_build(&pool, build.id).await.unwrap();
    let scores: Vec<Option<f64>> = diffs.iter().map(|d| d.score).collect();
    assert_eq!(
        scores,
        vec![Some(0.3), Some(0.0), None],
        "largest difference first, unscored diffs last"
    );
}

#[sqlx::test]
async fn test_bulk_validation_patch_updates_every_diff(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let repo = seed_user_repository(&pool, &owner, "web", true).await;
    let (bucket, shots) = seed_bucket(&pool, repo.id, "master", &["home", "login"]).await;

    let build = BuildRepo::create(
        &pool,
        &CreateBuild {
            repository_id: repo.id,
            base_screenshot_bucket_id: None,
            compare_screenshot_bucket_id: bucket,
        },
    )
    .await
    .unwrap();

    for shot in &shots {
        ScreenshotDiffRepo::create(
            &pool,
            build.id,
            &CreateScreenshotDiff {
                base_screenshot_id: None,
                compare_screenshot_id: shot.id,
                score: Some(0.2),
                s3_id: None,
            },
        )
        .await
        .unwrap();
    }

    let patched = ScreenshotDiffRepo::set_validation_status_for_build(
        &pool,
        build.id,
        ValidationStatus::Rejected,
    )
    .await
    .unwrap();
    assert_eq!(patched, 2);

    let diffs = ScreenshotDiffRepo::list_for_build(&pool, build.id).await.unwrap();
    assert!(diffs
        .iter()
        .all(|d| d.validation_status().unwrap() == ValidationStatus::Rejected));

    let states: Vec<_> = diffs.iter().map(|d| d.state().unwrap()).collect();
    assert!(states.iter().all(|s| s.score == Some(0.2)));
}

#[sqlx::test]
async fn test_get_user_only_matches_related_users(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let reviewer = seed_user(&pool, "bob").await;
    let outsider = seed_user(&pool, "mallory").await;
    let repo = seed_user_repository(&pool, &owner, "web", true).await;
    let (bucket, _) = seed_bucket(&pool, repo.id, "master", &[]).await;

    RepositoryRepo::grant_right(&pool, repo.id, reviewer.id).await.unwrap();

    let build = BuildRepo::create(
        &pool,
        &CreateBuild {
            repository_id: repo.id,
            base_screenshot_bucket_id: None,
            compare_screenshot_bucket_id: bucket,
        },
    )
    .await
    .unwrap();

    let found = BuildRepo::get_user(&pool, build.id, reviewer.id).await.unwrap();
    assert_eq!(found.map(|u| u.login), Some("bob".to_string()));

    let missing = BuildRepo::get_user(&pool, build.id, outsider.id).await.unwrap();
    assert!(missing.is_none(), "unrelated users are not attached to the build");
}
