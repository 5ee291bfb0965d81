//! Pure derivation helpers used by the stores and the view layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ServiceCategory;

/// Mean of the given ratings, rounded to one decimal place.
///
/// Returns 0.0 for an empty slice so freshly created listings keep their
/// zero rating.
pub fn average_rating(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
    round_one_decimal(f64::from(sum) / ratings.len() as f64)
}

/// Round to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Human-readable age of a timestamp relative to `now`.
///
/// Anything older than a week falls back to the absolute date.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 7 {
        return plural(days, "day");
    }

    format_long_date(timestamp)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Absolute date in the "May 10, 2025" style used across the UI.
pub fn format_long_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

/// Up to two uppercase initials from a display name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Criteria for narrowing a listing search. Empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Restrict to one category.
    pub category: Option<ServiceCategory>,
    /// Case-insensitive substring match against name and description.
    pub query: Option<String>,
    /// Exact city match, case-insensitive.
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Minimum derived rating (inclusive).
    pub min_rating: Option<f64>,
}

/// Sort order for listing search results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingSort {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    MostReviewed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn average_of_mixed_ratings_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[5, 4, 5]), 4.7);
    }

    #[test]
    fn average_of_no_ratings_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap();

        let t = now - chrono::Duration::seconds(30);
        assert_eq!(format_relative_time(t, now), "just now");

        let t = now - chrono::Duration::minutes(5);
        assert_eq!(format_relative_time(t, now), "5 minutes ago");

        let t = now - chrono::Duration::hours(1);
        assert_eq!(format_relative_time(t, now), "1 hour ago");

        let t = now - chrono::Duration::days(3);
        assert_eq!(format_relative_time(t, now), "3 days ago");

        let t = now - chrono::Duration::days(30);
        assert_eq!(format_relative_time(t, now), "April 10, 2025");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Jane Business"), "JB");
        assert_eq!(initials("cher"), "C");
        assert_eq!(initials(""), "");
        assert_eq!(initials("Anna Maria van der Berg"), "AM");
    }
}
