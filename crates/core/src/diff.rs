//! Screenshot-diff validation.
//!
//! Invoked explicitly before persisting a diff row, instead of living in a
//! model lifecycle hook. Returns a structured [`CoreError`] so callers can
//! surface the violation to the API client.

use crate::error::CoreError;
use crate::types::DbId;

/// Validate that a value falls within `[0.0, 1.0]`.
///
/// Returns a `CoreError::Validation` naming the field if out of range.
pub fn validate_unit_range(value: f64, name: &str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

/// Validate a screenshot diff before it is persisted.
///
/// A diff may have no base screenshot (a brand-new screenshot with no
/// baseline), but when it does, the base must not be the compare screenshot
/// itself. The score, when already computed, must be a unit-range metric.
pub fn validate_screenshot_diff(
    base_screenshot_id: Option<DbId>,
    compare_screenshot_id: DbId,
    score: Option<f64>,
) -> Result<(), CoreError> {
    if base_screenshot_id == Some(compare_screenshot_id) {
        return Err(CoreError::Validation(
            "The base screenshot should be different to the compare one.".into(),
        ));
    }

    if let Some(score) = score {
        validate_unit_range(score, "score")?;
    }

    Ok(())
}
