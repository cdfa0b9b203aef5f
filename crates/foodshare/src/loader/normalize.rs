//! Cell cleanup applied while loading CSV files.

use foodshare_core::{
    err,
    record::ClaimStatus,
    schema::{Column, ColumnType},
    Error, Result, Value,
};

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Header names are matched case-insensitively, ignoring surrounding space.
pub(super) fn header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Converts one raw cell to the value stored for `column`.
pub(super) fn cell(column: &Column, raw: &str) -> Result<Value> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Value::Null);
    }

    match column.ty {
        ColumnType::Integer => {
            let value = integer(raw)
                .ok_or_else(|| err!("`{}` value {raw:?} is not an integer", column.name))?;
            if column.name == "quantity" && value < 0 {
                return Err(Error::negative_quantity(value));
            }
            Ok(Value::Integer(value))
        }
        ColumnType::Text if column.name == "city" => Ok(Value::Text(title_case(raw))),
        ColumnType::Text if column.name == "status" => {
            let status = ClaimStatus::from_stored(raw);
            if !status.is_known() {
                log::warn!("`status`: keeping unrecognized claim status {raw:?}");
            }
            Ok(status.into())
        }
        ColumnType::Text => Ok(Value::Text(raw.to_string())),
        ColumnType::Date => Ok(Value::Text(date(raw).unwrap_or_else(|| {
            log::warn!("`{}`: keeping unparseable date {raw:?}", column.name);
            raw.to_string()
        }))),
        ColumnType::Timestamp => Ok(Value::Text(timestamp(raw).unwrap_or_else(|| {
            log::warn!("`{}`: keeping unparseable timestamp {raw:?}", column.name);
            raw.to_string()
        }))),
    }
}

fn integer(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }

    // Spreadsheet exports write whole numbers as `12.0`
    let v = raw.parse::<f64>().ok()?;
    (v.fract() == 0.0 && v.is_finite()).then_some(v as i64)
}

/// Normalizes a date to `YYYY-MM-DD`.
pub(super) fn date(raw: &str) -> Option<String> {
    // A date with a time component keeps only the date
    if let Some(ts) = parse_timestamp(raw) {
        return Some(ts.date().format("%Y-%m-%d").to_string());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Normalizes a timestamp to `YYYY-MM-DD HH:MM:SS`.
pub(super) fn timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw)
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts at any letter that follows a non-letter, so `"new delhi"`
/// becomes `"New Delhi"` and `"o'NEILL"` becomes `"O'Neill"`.
pub(crate) fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;

    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodshare_core::schema::{CLAIMS, FOOD_LISTINGS, PROVIDERS};

    fn column(table: &'static foodshare_core::schema::Table, name: &str) -> &'static Column {
        table.column(name).unwrap()
    }

    #[test]
    fn headers_are_trimmed_and_lowercased() {
        assert_eq!(header("  Provider_ID "), "provider_id");
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("new delhi"), "New Delhi");
        assert_eq!(title_case("SOUTH  KATIE"), "South  Katie");
        assert_eq!(title_case("o'neill-ville"), "O'Neill-Ville");
    }

    #[test]
    fn city_cells_are_title_cased() {
        let value = cell(column(&PROVIDERS, "city"), "  east jessica ").unwrap();
        assert_eq!(value, Value::from("East Jessica"));
    }

    #[test]
    fn other_text_is_only_trimmed() {
        let value = cell(column(&PROVIDERS, "type"), " grocery STORE ").unwrap();
        assert_eq!(value, Value::from("grocery STORE"));
    }

    #[test]
    fn known_statuses_are_canonicalized() {
        let status = column(&CLAIMS, "status");
        assert_eq!(cell(status, " completed ").unwrap(), Value::from("Completed"));
        assert_eq!(cell(status, "In Progress").unwrap(), Value::from("In Progress"));
    }

    #[test]
    fn empty_cells_become_null() {
        assert_eq!(cell(column(&FOOD_LISTINGS, "quantity"), "  ").unwrap(), Value::Null);
    }

    #[test]
    fn integers_accept_whole_floats() {
        assert_eq!(
            cell(column(&FOOD_LISTINGS, "quantity"), "40.0").unwrap(),
            Value::Integer(40)
        );
        assert!(cell(column(&FOOD_LISTINGS, "quantity"), "forty").is_err());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = cell(column(&FOOD_LISTINGS, "quantity"), "-3").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn dates_are_normalized() {
        assert_eq!(date("3/17/2025").as_deref(), Some("2025-03-17"));
        assert_eq!(date("2025-03-17").as_deref(), Some("2025-03-17"));
        assert_eq!(date("2025-03-17 10:30:00").as_deref(), Some("2025-03-17"));
        assert_eq!(date("someday"), None);
    }

    #[test]
    fn timestamps_are_normalized() {
        assert_eq!(
            timestamp("3/5/2025 5:26").as_deref(),
            Some("2025-03-05 05:26:00")
        );
        assert_eq!(
            timestamp("2025-03-05T17:26:09").as_deref(),
            Some("2025-03-05 17:26:09")
        );
    }

    #[test]
    fn unparseable_dates_are_kept() {
        let value = cell(column(&CLAIMS, "timestamp"), "yesterday").unwrap();
        assert_eq!(value, Value::from("yesterday"));
    }
}
