//! Per-year summary tables feeding the dashboard charts

use serde::{Deserialize, Serialize};

/// Average arrival delay for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDelay {
    pub month: u8,
    /// None when every record of the month lacks ArrDelay
    pub avg_arr_delay: Option<f64>,
    /// Records that contributed a delay value
    pub samples: u64,
}

/// Flights per distance group (pie chart slices)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceGroupFlights {
    pub distance_group: u8,
    pub flights: f64,
}

/// Flights per destination state code (bar chart)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFlights {
    pub dest_state: String,
    pub flights: f64,
}

/// Flights per (month, destination state name) pair (sunburst leaves)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStateFlights {
    pub month: u8,
    pub dest_state_name: String,
    pub flights: f64,
}

/// Flights per reporting airline (bubble chart)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineFlights {
    pub reporting_airline: String,
    pub flights: f64,
}

/// All five tables computed for a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    /// Records matching the year
    pub record_count: usize,
    /// Sorted by month ascending
    pub monthly_delay: Vec<MonthlyDelay>,
    /// Sorted by distance group ascending
    pub distance_groups: Vec<DistanceGroupFlights>,
    /// Sorted by state code ascending
    pub dest_states: Vec<StateFlights>,
    /// Sorted by (month, state name) ascending
    pub month_states: Vec<MonthStateFlights>,
    /// Sorted by airline code ascending
    pub airlines: Vec<AirlineFlights>,
}

/// One inner ring segment of the sunburst: a month and its state leaves
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBranch<'a> {
    pub month: u8,
    pub flights: f64,
    /// Sorted by flights descending, then name
    pub states: Vec<&'a MonthStateFlights>,
}

impl YearSummary {
    /// Summary with no rows for `year`
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            record_count: 0,
            monthly_delay: Vec::new(),
            distance_groups: Vec::new(),
            dest_states: Vec::new(),
            month_states: Vec::new(),
            airlines: Vec::new(),
        }
    }

    /// True when the year matched no records
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Total flights across destination states
    pub fn total_flights(&self) -> f64 {
        self.dest_states.iter().map(|s| s.flights).sum()
    }

    /// Total flights across the month × state table.
    ///
    /// Differs from `total_flights` when rows carry a state name but no
    /// state code (or the reverse), so hierarchy shares divide by this.
    pub fn hierarchy_total(&self) -> f64 {
        self.month_states.iter().map(|s| s.flights).sum()
    }

    /// Group the month × state table into month branches (month ascending)
    pub fn hierarchy(&self) -> Vec<MonthBranch<'_>> {
        let mut branches: Vec<MonthBranch<'_>> = Vec::new();

        // month_states is sorted by month, so leaves of one month are contiguous
        for leaf in &self.month_states {
            match branches.last_mut() {
                Some(branch) if branch.month == leaf.month => {
                    branch.flights += leaf.flights;
                    branch.states.push(leaf);
                }
                _ => branches.push(MonthBranch {
                    month: leaf.month,
                    flights: leaf.flights,
                    states: vec![leaf],
                }),
            }
        }

        for branch in &mut branches {
            branch.states.sort_by(|a, b| {
                b.flights
                    .partial_cmp(&a.flights)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.dest_state_name.cmp(&b.dest_state_name))
            });
        }

        branches
    }
}
