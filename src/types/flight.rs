//! Flight records and the in-memory dataset

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the airline on-time performance CSV.
///
/// Only the columns the dashboard aggregates are kept; every other column in
/// the source file is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u8,
    /// Arrival delay in minutes (negative = early)
    #[serde(rename = "ArrDelay", default)]
    pub arr_delay: Option<f64>,
    #[serde(rename = "DistanceGroup", default)]
    pub distance_group: Option<u8>,
    /// Destination state code (e.g. "CA")
    #[serde(rename = "DestState", default)]
    pub dest_state: Option<String>,
    /// Destination state name (e.g. "California")
    #[serde(rename = "DestStateName", default)]
    pub dest_state_name: Option<String>,
    /// Carrier code (e.g. "AA")
    #[serde(rename = "Reporting_Airline", default)]
    pub reporting_airline: Option<String>,
    #[serde(rename = "Flights", default)]
    pub flights: Option<f64>,
}

impl FlightRecord {
    /// Arrival delay, treating NaN the same as an empty cell
    pub fn delay(&self) -> Option<f64> {
        self.arr_delay.filter(|d| !d.is_nan())
    }

    /// Flight count contribution to sums (missing or NaN counts as nothing)
    pub fn flight_count(&self) -> f64 {
        self.flights.filter(|f| !f.is_nan()).unwrap_or(0.0)
    }
}

/// Number of records present for a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub records: usize,
}

/// Full dataset, loaded once and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<FlightRecord>,
}

impl Dataset {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years with their record counts (sorted by year ascending)
    pub fn years(&self) -> Vec<YearCount> {
        let mut counts: HashMap<i32, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.year).or_default() += 1;
        }

        let mut years: Vec<YearCount> = counts
            .into_iter()
            .map(|(year, records)| YearCount { year, records })
            .collect();
        years.sort_by_key(|y| y.year);
        years
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.records.iter().any(|r| r.year == year)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::FlightRecord;

    /// Build a fully-populated record; tests override fields as needed
    pub fn record(year: i32, month: u8, arr_delay: Option<f64>, flights: f64) -> FlightRecord {
        FlightRecord {
            year,
            month,
            arr_delay,
            distance_group: Some(3),
            dest_state: Some("CA".into()),
            dest_state_name: Some("California".into()),
            reporting_airline: Some("AA".into()),
            flights: Some(flights),
        }
    }
}
