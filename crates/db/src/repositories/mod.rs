//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Relationships are explicit
//! foreign-key joins written here, not a runtime-reflected relation graph.

pub mod build_notification_repo;
pub mod build_repo;
pub mod organization_repo;
pub mod repository_repo;
pub mod screenshot_bucket_repo;
pub mod screenshot_diff_repo;
pub mod screenshot_repo;
pub mod user_repo;

pub use build_notification_repo::BuildNotificationRepo;
pub use build_repo::BuildRepo;
pub use organization_repo::OrganizationRepo;
pub use repository_repo::RepositoryRepo;
pub use screenshot_bucket_repo::ScreenshotBucketRepo;
pub use screenshot_diff_repo::ScreenshotDiffRepo;
pub use screenshot_repo::ScreenshotRepo;
pub use user_repo::UserRepo;
