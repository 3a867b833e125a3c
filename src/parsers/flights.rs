//! Airline on-time performance CSV parser
//!
//! The published dataset is ISO-8859-1 encoded and carries ~110 columns.
//! Rows are split by the `csv` reader, then decoded into `FlightRecord`s in
//! parallel using rayon; only the columns `FlightRecord` names are read.

use crate::types::{AirdashError, FlightRecord, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Columns that must exist in the header for the file to be usable
const REQUIRED_COLUMNS: &[&str] = &["Year", "Month"];

/// Outcome of parsing one CSV document
#[derive(Debug, Default)]
pub struct ParsedFlights {
    /// Decoded rows, in file order
    pub records: Vec<FlightRecord>,
    /// Rows that could not be decoded (e.g. non-numeric Year)
    pub skipped_rows: usize,
}

/// Decode ISO-8859-1 bytes. Every byte maps to the code point of equal value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Parser for the flight CSV
pub struct FlightCsvParser;

impl FlightCsvParser {
    /// Parse a CSV file from disk
    pub fn parse_file(path: &Path) -> Result<ParsedFlights> {
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "parsing flight csv");
        Self::parse_bytes(&bytes)
    }

    /// Parse raw (Latin-1) CSV bytes
    pub fn parse_bytes(bytes: &[u8]) -> Result<ParsedFlights> {
        let text = decode_latin1(bytes);
        Self::parse_str(&text)
    }

    /// Parse CSV text with a header row
    pub fn parse_str(text: &str) -> Result<ParsedFlights> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *column) {
                return Err(AirdashError::Parse(format!(
                    "missing required column {:?}",
                    column
                )));
            }
        }

        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<std::result::Result<_, _>>()?;

        if rows.is_empty() {
            return Err(AirdashError::Parse("dataset contains no rows".into()));
        }

        let decoded: Vec<Option<FlightRecord>> = rows
            .par_iter()
            .map(|row| match row.deserialize::<FlightRecord>(Some(&headers)) {
                Ok(record) => Some(record),
                Err(e) => {
                    let line = row.position().map(|p| p.line()).unwrap_or(0);
                    debug!(line, error = %e, "skipping undecodable row");
                    None
                }
            })
            .collect();

        let total = decoded.len();
        let records: Vec<FlightRecord> = decoded.into_iter().flatten().collect();
        let skipped_rows = total - records.len();

        if records.is_empty() {
            return Err(AirdashError::Parse(format!(
                "none of {} rows could be decoded",
                total
            )));
        }
        if skipped_rows > 0 {
            warn!(skipped_rows, total, "some flight rows could not be decoded");
        }

        Ok(ParsedFlights {
            records,
            skipped_rows,
        })
    }
}
