//! Decoding of observation payloads in the FRED `series/observations`
//! JSON layout.
//!
//! Each observation carries a `date` (`YYYY-MM-DD`) and a string `value`.
//! Values that do not parse as a finite number (FRED uses `"."`) become
//! `None` and are later forward-filled by
//! [`PriceSeries::from_observations`](crate::series::PriceSeries::from_observations).
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::{RiskError, RiskResult};

/// Raw provider row.
pub type RawObservation = (NaiveDate, Option<f64>);

#[derive(Debug, Deserialize)]
struct Payload {
    observations: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    date: NaiveDate,
    value: String,
}

/// Decode an observations payload into raw rows.
///
/// # Errors
/// - `InvalidInput` if the document is not valid JSON or lacks the
///   `observations` array.
pub fn parse_observations(json: &str) -> RiskResult<Vec<RawObservation>> {
    let payload: Payload = serde_json::from_str(json)
        .map_err(|e| RiskError::invalid_input(format!("malformed observations payload: {e}")))?;
    Ok(payload
        .observations
        .into_iter()
        .map(|entry| {
            let value = entry.value.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            (entry.date, value)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Numeric strings parse and placeholders become missing values.
    //
    // Given
    // -----
    // - Three observations, the middle one valued ".".
    //
    // Expect
    // ------
    // - Values [61.17, None, 62.3] with their dates.
    fn decodes_values_and_placeholders() {
        let json = r#"{
            "realtime_start": "2024-01-01",
            "observations": [
                {"realtime_start": "2024-01-01", "date": "2020-01-02", "value": "61.17"},
                {"realtime_start": "2024-01-01", "date": "2020-01-03", "value": "."},
                {"realtime_start": "2024-01-01", "date": "2020-01-06", "value": "62.3"}
            ]
        }"#;
        let rows = parse_observations(json).expect("valid payload");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (NaiveDate::from_ymd_opt(2020, 1, 2).expect("date"), Some(61.17)));
        assert_eq!(rows[1].1, None);
        assert_eq!(rows[2].1, Some(62.3));
    }

    #[test]
    // Purpose
    // -------
    // A payload without observations is malformed input.
    //
    // Given
    // -----
    // - `{"error_code": 400}`.
    //
    // Expect
    // ------
    // - `InvalidInput`.
    fn missing_array_is_invalid_input() {
        assert!(matches!(
            parse_observations(r#"{"error_code": 400}"#),
            Err(RiskError::InvalidInput { .. })
        ));
    }
}
