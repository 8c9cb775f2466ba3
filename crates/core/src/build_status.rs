//! Build status resolution.
//!
//! A build's externally visible status is never stored. It is derived from
//! the comparison job status and, optionally, from the reviewer verdicts on
//! the build's screenshot diffs.

use crate::status::{BuildStatus, JobStatus, ValidationStatus};

/// A diff's score is a difference metric in `[0.0, 1.0]`. Anything strictly
/// above this threshold counts as a detected visual change.
pub const DIFF_SCORE_THRESHOLD: f64 = 0.0;

/// The slice of a screenshot diff that status resolution looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffState {
    /// Difference score; `None` while the comparison has not produced one.
    pub score: Option<f64>,
    pub validation_status: ValidationStatus,
}

/// Resolve a build's status from its job status and diff states.
///
/// While the job is not complete the status mirrors the job (`pending`,
/// `progress`, `error`, `aborted`). Once complete, the base status is
/// `success` when no diff score exceeds [`DIFF_SCORE_THRESHOLD`], otherwise
/// `failure`. With `use_validation`, a `failure` is upgraded to `success`
/// only when every diff has been accepted by a reviewer.
pub fn resolve_build_status(
    job_status: JobStatus,
    diffs: &[DiffState],
    use_validation: bool,
) -> BuildStatus {
    match job_status {
        JobStatus::Pending => return BuildStatus::Pending,
        JobStatus::Progress => return BuildStatus::Progress,
        JobStatus::Error => return BuildStatus::Error,
        JobStatus::Aborted => return BuildStatus::Aborted,
        JobStatus::Complete => {}
    }

    let has_difference = diffs
        .iter()
        .any(|diff| diff.score.is_some_and(|score| score > DIFF_SCORE_THRESHOLD));

    if !has_difference {
        return BuildStatus::Success;
    }

    if use_validation
        && diffs
            .iter()
            .all(|diff| diff.validation_status == ValidationStatus::Accepted)
    {
        return BuildStatus::Success;
    }

    BuildStatus::Failure
}
