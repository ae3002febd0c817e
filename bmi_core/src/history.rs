//! Append-only measurement history backed by a CSV file.
//!
//! Writers take an exclusive lock and readers a shared one, so the desktop
//! app and the CLI can run side by side. Reading never fails: rows that do
//! not match the expected layout are skipped with a warning.

use crate::{BmiCategory, MeasurementRecord, Result, TIMESTAMP_FORMAT};
use chrono::{DateTime, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use fs2::FileExt;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

const BMI_COLUMN: usize = 4;

/// A row in the CSV output. Field names double as the header row.
#[derive(Debug, Serialize)]
struct CsvRow {
    date: String,
    weight: f64,
    height_ft: f64,
    age: u32,
    bmi: f64,
    category: &'static str,
}

impl From<&MeasurementRecord> for CsvRow {
    fn from(record: &MeasurementRecord) -> Self {
        CsvRow {
            date: record.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            weight: record.weight_kg,
            height_ft: record.height_ft,
            age: record.age,
            bmi: record.bmi,
            category: record.category.label(),
        }
    }
}

/// CSV-backed history of measurements
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store for the given file. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first if the file is new or empty.
    pub fn append(&self, record: &MeasurementRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        // Decided under the lock so concurrent first writers emit one header
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(&file);
        writer.serialize(CsvRow::from(record))?;
        writer.flush()?;
        drop(writer);

        file.sync_all()?;
        file.unlock()?;

        tracing::debug!(
            "Appended BMI {} ({}) to {:?}",
            record.bmi,
            record.category,
            self.path
        );
        Ok(())
    }

    /// BMI values of every readable row, in file order.
    ///
    /// Skips blank rows, header rows and rows whose BMI column does not parse
    /// as a float. `nan` and `inf` parse and are kept; charting skips them.
    /// A missing or unreadable file yields an empty list.
    pub fn load_all(&self) -> Vec<f64> {
        self.scan(parse_bmi)
    }

    /// Every fully readable record, in file order.
    pub fn load_records(&self) -> Vec<MeasurementRecord> {
        self.scan(parse_record)
    }

    fn scan<T>(&self, parse: impl Fn(&StringRecord) -> Option<T>) -> Vec<T> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No history file at {:?}", self.path);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Unable to open history file {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        let locked = match file.lock_shared() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Unable to lock history file {:?}: {}. Reading unlocked.",
                    self.path,
                    e
                );
                false
            }
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(&file);

        let mut values = Vec::new();
        let mut skipped = 0usize;
        for (index, result) in reader.records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Failed to read history row {}: {}", index + 1, e);
                    if e.is_io_error() {
                        break;
                    }
                    skipped += 1;
                    continue;
                }
            };

            if is_blank(&row) || is_header(&row) {
                continue;
            }

            match parse(&row) {
                Some(value) => values.push(value),
                None => {
                    tracing::warn!("Skipping malformed history row {}", index + 1);
                    skipped += 1;
                }
            }
        }

        if locked {
            let _ = file.unlock();
        }

        tracing::debug!(
            "Read {} rows from {:?} ({} skipped)",
            values.len(),
            self.path,
            skipped
        );
        values
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

fn is_header(row: &StringRecord) -> bool {
    row.get(0)
        .is_some_and(|field| field.trim().eq_ignore_ascii_case("date"))
}

fn parse_bmi(row: &StringRecord) -> Option<f64> {
    row.get(BMI_COLUMN)?
        .trim()
        .parse::<f64>()
        .ok()
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

fn parse_record(row: &StringRecord) -> Option<MeasurementRecord> {
    let field = |i: usize| row.get(i).map(str::trim);

    Some(MeasurementRecord {
        recorded_at: parse_timestamp(field(0)?)?,
        weight_kg: field(1)?.parse().ok()?,
        height_ft: field(2)?.parse().ok()?,
        age: field(3)?.parse().ok()?,
        bmi: parse_bmi(row)?,
        category: BmiCategory::from_label(field(5)?)?,
    })
}
