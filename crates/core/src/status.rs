//! Closed status enums and their storage-string conversions.
//!
//! Statuses live in the database as plain strings. The conversion happens
//! explicitly at the storage boundary via `as_str` / `parse`, so an
//! unexpected string surfaces as a [`CoreError::Validation`] instead of a
//! silently invalid in-memory value.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// State of the comparison job backing a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Progress,
    Complete,
    Error,
    Aborted,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Progress => "progress",
            JobStatus::Complete => "complete",
            JobStatus::Error => "error",
            JobStatus::Aborted => "aborted",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "progress" => Ok(JobStatus::Progress),
            "complete" => Ok(JobStatus::Complete),
            "error" => Ok(JobStatus::Error),
            "aborted" => Ok(JobStatus::Aborted),
            other => Err(CoreError::Validation(format!(
                "unknown job status: {other}"
            ))),
        }
    }
}

/// Externally visible build status, derived and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Pending,
    Progress,
    Complete,
    Failure,
    Success,
    Error,
    Aborted,
}

impl BuildStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildStatus::Pending => "pending",
            BuildStatus::Progress => "progress",
            BuildStatus::Complete => "complete",
            BuildStatus::Failure => "failure",
            BuildStatus::Success => "success",
            BuildStatus::Error => "error",
            BuildStatus::Aborted => "aborted",
        }
    }
}

/// Reviewer verdict on a screenshot diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Unknown,
    Accepted,
    Rejected,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Unknown => "unknown",
            ValidationStatus::Accepted => "accepted",
            ValidationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "unknown" => Ok(ValidationStatus::Unknown),
            "accepted" => Ok(ValidationStatus::Accepted),
            "rejected" => Ok(ValidationStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "unknown validation status: {other}"
            ))),
        }
    }
}

/// Kind of a build notification dispatched to reviewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "progress")]
    Progress,
    #[serde(rename = "no-diff-detected")]
    NoDiffDetected,
    #[serde(rename = "diff-detected")]
    DiffDetected,
    #[serde(rename = "diff-accepted")]
    DiffAccepted,
    #[serde(rename = "diff-rejected")]
    DiffRejected,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Progress => "progress",
            NotificationKind::NoDiffDetected => "no-diff-detected",
            NotificationKind::DiffDetected => "diff-detected",
            NotificationKind::DiffAccepted => "diff-accepted",
            NotificationKind::DiffRejected => "diff-rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "progress" => Ok(NotificationKind::Progress),
            "no-diff-detected" => Ok(NotificationKind::NoDiffDetected),
            "diff-detected" => Ok(NotificationKind::DiffDetected),
            "diff-accepted" => Ok(NotificationKind::DiffAccepted),
            "diff-rejected" => Ok(NotificationKind::DiffRejected),
            other => Err(CoreError::Validation(format!(
                "unknown notification kind: {other}"
            ))),
        }
    }
}
