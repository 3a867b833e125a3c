//! Plain-text rendering of summaries for headless commands

use std::fmt::Write;

use crate::format::{
    format_delay, format_flights, format_number, month_label, share_percent, titles,
};
use crate::types::{YearCount, YearSummary};

/// Render all five tables for one year
pub fn render_summary(summary: &YearSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - {} ({} records)",
        titles::DASHBOARD,
        summary.year,
        format_number(summary.record_count as u64)
    );

    if summary.is_empty() {
        let _ = writeln!(out, "\nNo flights recorded for {}", summary.year);
        return out;
    }

    section(&mut out, titles::DELAY_TREND);
    let _ = writeln!(out, "  {:<6}{:>16}{:>10}", "Month", "Avg delay (min)", "Samples");
    for m in &summary.monthly_delay {
        let _ = writeln!(
            out,
            "  {:<6}{:>16}{:>10}",
            month_label(m.month),
            format_delay(m.avg_arr_delay),
            m.samples
        );
    }

    let distance_total: f64 = summary.distance_groups.iter().map(|g| g.flights).sum();
    section(&mut out, titles::DISTANCE_SHARE);
    let _ = writeln!(out, "  {:<6}{:>12}{:>9}", "Group", "Flights", "Share");
    for g in &summary.distance_groups {
        let _ = writeln!(
            out,
            "  {:<6}{:>12}{:>8.1}%",
            g.distance_group,
            format_flights(g.flights),
            share_percent(g.flights, distance_total)
        );
    }

    section(&mut out, titles::STATE_BARS);
    let _ = writeln!(out, "  {:<6}{:>12}", "State", "Flights");
    for s in &summary.dest_states {
        let _ = writeln!(out, "  {:<6}{:>12}", s.dest_state, format_flights(s.flights));
    }

    section(&mut out, titles::AIRLINE_BUBBLES);
    let _ = writeln!(out, "  {:<8}{:>12}", "Airline", "Flights");
    for a in &summary.airlines {
        let _ = writeln!(
            out,
            "  {:<8}{:>12}",
            a.reporting_airline,
            format_flights(a.flights)
        );
    }

    section(&mut out, titles::HIERARCHY);
    let total = summary.hierarchy_total();
    for branch in summary.hierarchy() {
        let _ = writeln!(
            out,
            "  {:<24}{:>10}{:>8.1}%",
            month_label(branch.month),
            format_flights(branch.flights),
            share_percent(branch.flights, total)
        );
        for leaf in &branch.states {
            let _ = writeln!(
                out,
                "    {:<22}{:>10}{:>8.1}%",
                leaf.dest_state_name,
                format_flights(leaf.flights),
                share_percent(leaf.flights, branch.flights)
            );
        }
    }

    out
}

/// Render the year list
pub fn render_years(years: &[YearCount]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<6}{:>10}", "Year", "Records");
    for y in years {
        let _ = writeln!(out, "{:<6}{:>10}", y.year, format_number(y.records as u64));
    }
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{}", "─".repeat(title.chars().count()));
}
