//! Core domain types for the BMI tracker.
//!
//! - Validated measurements entered on the form
//! - BMI categories and assessments
//! - Persisted measurement records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used in the history file (ISO-8601, local time, no offset).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// ============================================================================
// Input
// ============================================================================

/// A validated form submission. Every field is strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_ft: f64,
    pub age: u32,
}

// ============================================================================
// Categories
// ============================================================================

/// The four fixed BMI bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity")]
    Obesity,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::Obesity,
    ];

    /// Human-readable label, as written to the history file
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }

    /// Parse a stored label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of assessing a measurement: BMI rounded to one decimal and its band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assessment {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl Assessment {
    /// The result line shown after a calculation
    pub fn summary(&self) -> String {
        format!("BMI: {:.1}  ➔  {}", self.bmi, self.category)
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// One persisted measurement with its derived BMI and category.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementRecord {
    pub recorded_at: NaiveDateTime,
    pub weight_kg: f64,
    pub height_ft: f64,
    pub age: u32,
    pub bmi: f64,
    pub category: BmiCategory,
}

impl MeasurementRecord {
    pub fn new(recorded_at: NaiveDateTime, measurement: &Measurement, assessment: &Assessment) -> Self {
        Self {
            recorded_at,
            weight_kg: measurement.weight_kg,
            height_ft: measurement.height_ft,
            age: measurement.age,
            bmi: assessment.bmi,
            category: assessment.category,
        }
    }
}
