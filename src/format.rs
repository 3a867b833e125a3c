//! Number, label and title formatting shared by the dashboard and CLI reports

/// Titles shown on the dashboard and as report section headings
pub mod titles {
    pub const DASHBOARD: &str = "Airline Performance Dashboard";
    pub const DELAY_TREND: &str = "Month vs Average Flight Delay Time";
    pub const DISTANCE_SHARE: &str = "Distance Group Proportion by Month";
    pub const STATE_BARS: &str = "Total Flights by Destination State";
    pub const AIRLINE_BUBBLES: &str = "Reporting Airline vs Number of Flights";
    pub const HIERARCHY: &str = "Flight Distribution Hierarchy";
}

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
/// Optimized: no Vec<char> allocation since digits are ASCII
pub fn format_number(n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Flight counts are stored as floats in the source; show them as integers
pub fn format_flights(flights: f64) -> String {
    format_number(flights.max(0.0).round() as u64)
}

/// Average delay in minutes, "n/a" when no delay was recorded
pub fn format_delay(delay: Option<f64>) -> String {
    match delay {
        Some(d) => format!("{:.2}", d),
        None => "n/a".to_string(),
    }
}

/// Percentage of `part` in `total` (0 when total is not positive)
pub fn share_percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// Format a percentage bar with filled/empty blocks
/// Example: 50.0% with width 10 → "█████░░░░░"
pub fn format_percentage_bar(percent: f64, width: usize) -> String {
    let filled = (((percent / 100.0) * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Three-letter month label; out-of-range months fall back to the number
pub fn month_label(month: u8) -> String {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    match month {
        1..=12 => NAMES[(month - 1) as usize].to_string(),
        _ => format!("M{}", month),
    }
}

/// Truncate to `max` characters with an ellipsis (UTF-8 safe)
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let keep = max.saturating_sub(1);
        format!("{}…", text.chars().take(keep).collect::<String>())
    } else {
        text.to_string()
    }
}
