//! Form submission: validate, assess, persist, reload.

use crate::history::HistoryStore;
use crate::{engine, form, Assessment, Measurement, MeasurementRecord, Result, ValidationError};
use chrono::NaiveDateTime;

/// Outcome of an accepted submission
#[derive(Clone, Debug)]
pub struct Submission {
    pub record: MeasurementRecord,
    pub assessment: Assessment,
    /// Every stored BMI value after the append, oldest first
    pub history: Vec<f64>,
}

/// Validate the raw form fields and compute the assessment without storing it.
pub fn preview(weight: &str, height: &str, age: &str) -> Result<Assessment> {
    let (_, assessment) = assess_fields(weight, height, age)?;
    Ok(assessment)
}

// Tiny heights overflow the formula; such a row could never be charted.
fn assess_fields(
    weight: &str,
    height: &str,
    age: &str,
) -> Result<(Measurement, Assessment)> {
    let measurement = form::parse_measurement(weight, height, age)?;
    let assessment = engine::assess(&measurement);
    if !assessment.bmi.is_finite() {
        return Err(ValidationError::OutOfRange.into());
    }
    Ok((measurement, assessment))
}

/// Validate the raw form fields, append the resulting record and reload the trend.
///
/// Validation failures are returned before the history file is touched.
pub fn record_measurement(
    store: &HistoryStore,
    weight: &str,
    height: &str,
    age: &str,
    now: NaiveDateTime,
) -> Result<Submission> {
    let (measurement, assessment) = assess_fields(weight, height, age)?;
    let record = MeasurementRecord::new(now, &measurement, &assessment);

    store.append(&record)?;
    tracing::info!(
        "Recorded BMI {:.1} ({}) for age {}",
        assessment.bmi,
        assessment.category,
        measurement.age
    );

    let history = store.load_all();
    Ok(Submission {
        record,
        assessment,
        history,
    })
}
