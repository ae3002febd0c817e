#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI tracker.
//!
//! This crate provides:
//! - The BMI engine (formula, category bands, gauge scale)
//! - Form validation
//! - The CSV-backed measurement history
//! - Trend chart geometry
//! - Configuration, errors and logging shared by the front-ends

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod engine;
pub mod form;
pub mod history;
pub mod trend;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use types::*;
pub use config::Config;
pub use engine::{assess, calculate_bmi, categorize, gauge_value, GAUGE_MAX};
pub use form::parse_measurement;
pub use history::HistoryStore;
pub use trend::{PlotArea, TrendSeries};
pub use tracker::{record_measurement, Submission};
