//! `D/M/YYYY` date strings to month and day bucket keys.
//!
//! Malformed input is an error, never a placeholder bucket: callers decide
//! whether to abort or skip the offending record (see [`DatePolicy`]).

use chrono::Month;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("Malformed date {0:?}: expected D/M/YYYY")]
    WrongPartCount(String),
    #[error("Malformed date {value:?}: {part} is not a number")]
    NotANumber { value: String, part: &'static str },
    #[error("Malformed date {value:?}: month {month} is outside 1..=12")]
    MonthOutOfRange { value: String, month: u32 },
}

/// What a date reducer does with a value it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Fail the whole reduction with the first [`PeriodError`].
    Strict,
    /// Log and leave the record out of the series.
    #[default]
    SkipMalformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayMonthYear {
    day: u32,
    month: Month,
    year: i32,
}

fn split_date(value: &str) -> Result<DayMonthYear, PeriodError> {
    let parts: Vec<&str> = value.trim().split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(PeriodError::WrongPartCount(value.to_string()));
    };

    let number = |s: &str, part: &'static str| -> Result<u32, PeriodError> {
        s.parse::<u32>().map_err(|_| PeriodError::NotANumber {
            value: value.to_string(),
            part,
        })
    };

    let day = number(*day, "day")?;
    let month_no = number(*month, "month")?;
    let year = number(*year, "year")? as i32;

    let month = u8::try_from(month_no)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(PeriodError::MonthOutOfRange {
            value: value.to_string(),
            month: month_no,
        })?;

    Ok(DayMonthYear { day, month, year })
}

/// `"15/03/2024"` to `"March 2024"`.
pub fn to_month_year(value: &str) -> Result<String, PeriodError> {
    let d = split_date(value)?;
    Ok(format!("{} {}", d.month.name(), d.year))
}

/// `"05/03/2024"` to `"5 March 2024"`. The day is written without padding so
/// `5/3/2024` and `05/03/2024` land in the same bucket.
pub fn to_full_date(value: &str) -> Result<String, PeriodError> {
    let d = split_date(value)?;
    Ok(format!("{} {} {}", d.day, d.month.name(), d.year))
}
