//! Aggregator service for computing per-year chart tables

use crate::types::{
    AirlineFlights, DistanceGroupFlights, FlightRecord, MonthStateFlights, MonthlyDelay,
    StateFlights, YearSummary,
};
use std::collections::HashMap;

/// Aggregator for computing per-year summary tables
pub struct Aggregator;

impl Aggregator {
    /// Records whose year matches, in dataset order
    pub fn filter_year<'a, I>(records: I, year: i32) -> Vec<&'a FlightRecord>
    where
        I: IntoIterator<Item = &'a FlightRecord>,
    {
        records.into_iter().filter(|r| r.year == year).collect()
    }

    /// Filter to `year` and compute all five tables
    pub fn summarize(records: &[FlightRecord], year: i32) -> YearSummary {
        let view = Self::filter_year(records, year);
        if view.is_empty() {
            return YearSummary::empty(year);
        }

        YearSummary {
            year,
            record_count: view.len(),
            monthly_delay: Self::monthly_delay(&view),
            distance_groups: Self::distance_groups(&view),
            dest_states: Self::dest_states(&view),
            month_states: Self::month_states(&view),
            airlines: Self::airlines(&view),
        }
    }

    /// Mean ArrDelay per month (sorted by month ascending).
    /// Missing delays are skipped; a month with no delays keeps a None mean.
    pub fn monthly_delay(view: &[&FlightRecord]) -> Vec<MonthlyDelay> {
        let mut month_map: HashMap<u8, (f64, u64)> = HashMap::new();

        for record in view {
            let acc = month_map.entry(record.month).or_insert((0.0, 0));
            if let Some(delay) = record.delay() {
                acc.0 += delay;
                acc.1 = acc.1.saturating_add(1);
            }
        }

        let mut result: Vec<MonthlyDelay> = month_map
            .into_iter()
            .map(|(month, (sum, samples))| MonthlyDelay {
                month,
                avg_arr_delay: (samples > 0).then(|| sum / samples as f64),
                samples,
            })
            .collect();
        result.sort_by_key(|m| m.month);
        result
    }

    /// Flights summed per distance group (sorted by group ascending)
    pub fn distance_groups(view: &[&FlightRecord]) -> Vec<DistanceGroupFlights> {
        let mut group_map: HashMap<u8, f64> = HashMap::new();

        for record in view {
            if let Some(group) = record.distance_group {
                *group_map.entry(group).or_default() += record.flight_count();
            }
        }

        let mut result: Vec<DistanceGroupFlights> = group_map
            .into_iter()
            .map(|(distance_group, flights)| DistanceGroupFlights {
                distance_group,
                flights,
            })
            .collect();
        result.sort_by_key(|g| g.distance_group);
        result
    }

    /// Flights summed per destination state code (sorted by code)
    pub fn dest_states(view: &[&FlightRecord]) -> Vec<StateFlights> {
        let mut result: Vec<StateFlights> = Self::sum_by_label(view, |r| r.dest_state.as_deref())
            .into_iter()
            .map(|(dest_state, flights)| StateFlights {
                dest_state,
                flights,
            })
            .collect();
        result.sort_by(|a, b| a.dest_state.cmp(&b.dest_state));
        result
    }

    /// Flights summed per (month, destination state name) pair
    pub fn month_states(view: &[&FlightRecord]) -> Vec<MonthStateFlights> {
        let mut pair_map: HashMap<(u8, &str), f64> = HashMap::new();

        for record in view {
            if let Some(name) = record.dest_state_name.as_deref() {
                *pair_map.entry((record.month, name)).or_default() += record.flight_count();
            }
        }

        let mut result: Vec<MonthStateFlights> = pair_map
            .into_iter()
            .map(|((month, name), flights)| MonthStateFlights {
                month,
                dest_state_name: name.to_string(),
                flights,
            })
            .collect();
        result.sort_by(|a, b| {
            a.month
                .cmp(&b.month)
                .then_with(|| a.dest_state_name.cmp(&b.dest_state_name))
        });
        result
    }

    /// Flights summed per reporting airline (sorted by carrier code)
    pub fn airlines(view: &[&FlightRecord]) -> Vec<AirlineFlights> {
        let mut result: Vec<AirlineFlights> =
            Self::sum_by_label(view, |r| r.reporting_airline.as_deref())
                .into_iter()
                .map(|(reporting_airline, flights)| AirlineFlights {
                    reporting_airline,
                    flights,
                })
                .collect();
        result.sort_by(|a, b| a.reporting_airline.cmp(&b.reporting_airline));
        result
    }

    /// Sum flights keyed by a text column; records without the key are skipped
    fn sum_by_label<'a, F>(view: &[&'a FlightRecord], key: F) -> HashMap<String, f64>
    where
        F: Fn(&'a FlightRecord) -> Option<&'a str>,
    {
        let mut label_map: HashMap<&str, f64> = HashMap::new();

        for &record in view {
            if let Some(label) = key(record) {
                *label_map.entry(label).or_default() += record.flight_count();
            }
        }

        label_map
            .into_iter()
            .map(|(label, flights)| (label.to_string(), flights))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::record;

    #[allow(clippy::too_many_arguments)]
    fn make_record(
        year: i32,
        month: u8,
        delay: Option<f64>,
        state: &str,
        state_name: &str,
        airline: &str,
        distance_group: u8,
        flights: f64,
    ) -> FlightRecord {
        FlightRecord {
            year,
            month,
            arr_delay: delay,
            distance_group: Some(distance_group),
            dest_state: Some(state.into()),
            dest_state_name: Some(state_name.into()),
            reporting_airline: Some(airline.into()),
            flights: Some(flights),
        }
    }

    fn sample() -> Vec<FlightRecord> {
        vec![
            make_record(2010, 1, Some(10.0), "CA", "California", "AA", 3, 1.0),
            make_record(2010, 1, Some(20.0), "TX", "Texas", "UA", 5, 1.0),
            make_record(2010, 2, None, "CA", "California", "AA", 3, 1.0),
            make_record(2010, 2, Some(-6.0), "NY", "New York", "DL", 8, 1.0),
            make_record(2011, 1, Some(99.0), "CA", "California", "AA", 3, 1.0),
        ]
    }

    // ========== filter_year() tests ==========

    #[test]
    fn test_filter_year_keeps_only_matching_rows() {
        let records = sample();
        let view = Aggregator::filter_year(&records, 2010);
        assert_eq!(view.len(), 4);
        assert!(view.iter().all(|r| r.year == 2010));
    }

    #[test]
    fn test_filter_year_is_idempotent() {
        let records = sample();
        for year in [2010, 2011, 1899] {
            let once = Aggregator::filter_year(&records, year);
            let twice = Aggregator::filter_year(once.iter().copied(), year);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_filter_year_preserves_order() {
        let records = sample();
        let view = Aggregator::filter_year(&records, 2010);
        let months: Vec<u8> = view.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![1, 1, 2, 2]);
    }

    // ========== monthly_delay() tests ==========

    #[test]
    fn test_monthly_delay_mean_of_two_records() {
        let records = vec![
            record(2010, 1, Some(10.0), 1.0),
            record(2010, 1, Some(20.0), 1.0),
        ];
        let summary = Aggregator::summarize(&records, 2010);

        assert_eq!(summary.monthly_delay.len(), 1);
        assert_eq!(summary.monthly_delay[0].month, 1);
        assert_eq!(summary.monthly_delay[0].avg_arr_delay, Some(15.0));
        assert_eq!(summary.monthly_delay[0].samples, 2);
    }

    #[test]
    fn test_monthly_delay_skips_missing_values() {
        let records = sample();
        let summary = Aggregator::summarize(&records, 2010);

        // Month 2 has one missing delay and one -6.0
        let feb = &summary.monthly_delay[1];
        assert_eq!(feb.month, 2);
        assert_eq!(feb.avg_arr_delay, Some(-6.0));
        assert_eq!(feb.samples, 1);
    }

    #[test]
    fn test_monthly_delay_all_missing_keeps_month() {
        let records = vec![record(2010, 4, None, 1.0), record(2010, 4, None, 1.0)];
        let view = Aggregator::filter_year(&records, 2010);
        let result = Aggregator::monthly_delay(&view);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].month, 4);
        assert_eq!(result[0].avg_arr_delay, None);
        assert_eq!(result[0].samples, 0);
    }

    #[test]
    fn test_monthly_delay_sorted_ascending() {
        let records = vec![
            record(2010, 12, Some(1.0), 1.0),
            record(2010, 3, Some(1.0), 1.0),
            record(2010, 7, Some(1.0), 1.0),
        ];
        let summary = Aggregator::summarize(&records, 2010);
        let months: Vec<u8> = summary.monthly_delay.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![3, 7, 12]);
    }

    #[test]
    fn test_monthly_delay_matches_manual_mean() {
        let records = vec![
            record(2010, 6, Some(3.0), 1.0),
            record(2010, 6, Some(-1.0), 1.0),
            record(2010, 6, Some(7.0), 1.0),
            record(2011, 6, Some(500.0), 1.0),
        ];
        let summary = Aggregator::summarize(&records, 2010);
        let expected = (3.0 - 1.0 + 7.0) / 3.0;
        let mean = summary.monthly_delay[0].avg_arr_delay.unwrap();
        assert!((mean - expected).abs() < 1e-9);
    }

    // ========== flight sum tables ==========

    #[test]
    fn test_distance_groups_sum_flights() {
        let records = sample();
        let summary = Aggregator::summarize(&records, 2010);

        assert_eq!(
            summary.distance_groups,
            vec![
                DistanceGroupFlights {
                    distance_group: 3,
                    flights: 2.0
                },
                DistanceGroupFlights {
                    distance_group: 5,
                    flights: 1.0
                },
                DistanceGroupFlights {
                    distance_group: 8,
                    flights: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_dest_states_conserve_flights() {
        let records = sample();
        for year in [2010, 2011] {
            let summary = Aggregator::summarize(&records, year);
            let raw: f64 = Aggregator::filter_year(&records, year)
                .iter()
                .map(|r| r.flight_count())
                .sum();
            assert!((summary.total_flights() - raw).abs() < 1e-9);
        }
    }

    #[test]
    fn test_dest_states_sorted_by_code() {
        let records = sample();
        let summary = Aggregator::summarize(&records, 2010);
        let codes: Vec<&str> = summary
            .dest_states
            .iter()
            .map(|s| s.dest_state.as_str())
            .collect();
        assert_eq!(codes, vec!["CA", "NY", "TX"]);
        assert!((summary.dest_states[0].flights - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_month_states_composite_key() {
        let records = sample();
        let summary = Aggregator::summarize(&records, 2010);

        assert_eq!(summary.month_states.len(), 4);
        assert_eq!(summary.month_states[0].month, 1);
        assert_eq!(summary.month_states[0].dest_state_name, "California");
        assert_eq!(summary.month_states[2].month, 2);
        assert_eq!(summary.month_states[2].dest_state_name, "California");
        assert_eq!(summary.month_states[3].dest_state_name, "New York");
    }

    #[test]
    fn test_airlines_sum_flights() {
        let records = sample();
        let summary = Aggregator::summarize(&records, 2010);

        let aa = summary
            .airlines
            .iter()
            .find(|a| a.reporting_airline == "AA")
            .unwrap();
        assert!((aa.flights - 2.0).abs() < f64::EPSILON);
        assert_eq!(summary.airlines.len(), 3);
    }

    #[test]
    fn test_missing_keys_are_left_out() {
        let mut r = record(2010, 1, Some(5.0), 2.0);
        r.dest_state = None;
        r.reporting_airline = None;
        r.distance_group = None;
        let records = vec![r, record(2010, 1, Some(5.0), 1.0)];

        let summary = Aggregator::summarize(&records, 2010);
        assert_eq!(summary.dest_states.len(), 1);
        assert!((summary.dest_states[0].flights - 1.0).abs() < f64::EPSILON);
        assert!((summary.airlines[0].flights - 1.0).abs() < f64::EPSILON);
        assert!((summary.distance_groups[0].flights - 1.0).abs() < f64::EPSILON);
        // Month table still sees both rows
        assert_eq!(summary.monthly_delay[0].samples, 2);
    }

    // ========== summarize() tests ==========

    #[test]
    fn test_summarize_absent_year_is_empty() {
        let records = sample();
        let summary = Aggregator::summarize(&records, 1899);

        assert!(summary.is_empty());
        assert!(summary.monthly_delay.is_empty());
        assert!(summary.distance_groups.is_empty());
        assert!(summary.dest_states.is_empty());
        assert!(summary.month_states.is_empty());
        assert!(summary.airlines.is_empty());
    }

    #[test]
    fn test_summarize_empty_dataset() {
        let summary = Aggregator::summarize(&[], 2010);
        assert_eq!(summary, YearSummary::empty(2010));
    }

    #[test]
    fn test_summarize_record_count() {
        let records = sample();
        assert_eq!(Aggregator::summarize(&records, 2010).record_count, 4);
        assert_eq!(Aggregator::summarize(&records, 2011).record_count, 1);
    }

    // ========== fixture pipeline ==========

    #[test]
    fn test_summarize_parsed_fixture() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("airline_sample.csv");
        let parsed = crate::parsers::FlightCsvParser::parse_file(&path).unwrap();
        assert_eq!(parsed.skipped_rows, 0);

        let summary = Aggregator::summarize(&parsed.records, 2010);
        assert_eq!(summary.record_count, 8);

        // January: 12.0 and -8.0
        let jan = &summary.monthly_delay[0];
        assert_eq!(jan.month, 1);
        assert_eq!(jan.samples, 2);
        assert!((jan.avg_arr_delay.unwrap() - 2.0).abs() < 1e-9);

        // March has a row but no ArrDelay
        let mar = summary.monthly_delay.iter().find(|m| m.month == 3).unwrap();
        assert_eq!(mar.avg_arr_delay, None);

        // Every 2010 flight lands in exactly one destination state
        let expected: f64 = parsed
            .records
            .iter()
            .filter(|r| r.year == 2010)
            .map(|r| r.flight_count())
            .sum();
        assert!((summary.total_flights() - expected).abs() < 1e-9);
        assert!((summary.hierarchy_total() - expected).abs() < 1e-9);
        let ca = summary
            .dest_states
            .iter()
            .find(|s| s.dest_state == "CA")
            .unwrap();
        assert!((ca.flights - 2.0).abs() < 1e-9);
    }
}
