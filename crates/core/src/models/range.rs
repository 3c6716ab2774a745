use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Symbolic reporting range picked in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeKind {
    /// Hours of the current day
    Today,
    /// Days of the current week
    Week,
    /// Days of the current month
    Month,
    /// Months of the current year
    Year,
    /// Explicit inclusive date range
    Custom,
}

impl std::fmt::Display for RangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeKind::Today => write!(f, "Today"),
            RangeKind::Week => write!(f, "Week"),
            RangeKind::Month => write!(f, "Month"),
            RangeKind::Year => write!(f, "Year"),
            RangeKind::Custom => write!(f, "Custom"),
        }
    }
}

impl FromStr for RangeKind {
    type Err = CoreError;

    /// Case-insensitive. `Day` is accepted as an alias of `Today`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" | "day" => Ok(RangeKind::Today),
            "week" => Ok(RangeKind::Week),
            "month" => Ok(RangeKind::Month),
            "year" => Ok(RangeKind::Year),
            "custom" => Ok(RangeKind::Custom),
            _ => Err(CoreError::InvalidRangeKind(s.to_string())),
        }
    }
}

/// Inclusive calendar-date bounds of a custom range.
///
/// These are local calendar dates in the reporting timezone, not instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRangeBounds")]
pub struct RangeBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RangeBounds {
    /// Build bounds, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

/// The range selector: a kind plus, for `Custom`, explicit bounds.
///
/// `bounds` is only meaningful for `Custom`; the constructors and the
/// deserializer drop bounds supplied with any other kind. A `Custom`
/// range without bounds is valid and resolves to an empty axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawReportingRange")]
pub struct ReportingRange {
    pub kind: RangeKind,
    pub bounds: Option<RangeBounds>,
}

impl ReportingRange {
    pub fn today() -> Self {
        Self { kind: RangeKind::Today, bounds: None }
    }

    pub fn week() -> Self {
        Self { kind: RangeKind::Week, bounds: None }
    }

    pub fn month() -> Self {
        Self { kind: RangeKind::Month, bounds: None }
    }

    pub fn year() -> Self {
        Self { kind: RangeKind::Year, bounds: None }
    }

    /// A custom range over `start..=end`.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        Ok(Self {
            kind: RangeKind::Custom,
            bounds: Some(RangeBounds::new(start, end)?),
        })
    }

    /// A custom range whose dates have not been picked yet.
    pub fn custom_unbounded() -> Self {
        Self { kind: RangeKind::Custom, bounds: None }
    }

    /// Build from a kind and optional bounds, keeping bounds only for `Custom`.
    pub fn new(kind: RangeKind, bounds: Option<RangeBounds>) -> Self {
        let bounds = if kind == RangeKind::Custom { bounds } else { None };
        Self { kind, bounds }
    }
}

/// Custom bounds as the date picker sends them (`YYYY-MM-DD` strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRangeBounds {
    pub start: String,
    pub end: String,
}

impl TryFrom<RawRangeBounds> for RangeBounds {
    type Error = CoreError;

    fn try_from(raw: RawRangeBounds) -> Result<Self, Self::Error> {
        let start = parse_calendar_date(&raw.start)?;
        let end = parse_calendar_date(&raw.end)?;
        RangeBounds::new(start, end)
    }
}

/// The range selector as the UI sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReportingRange {
    #[serde(alias = "rangeType", alias = "range_type")]
    pub kind: String,

    #[serde(default, alias = "rangeDates", alias = "range_dates")]
    pub bounds: Option<RawRangeBounds>,
}

impl TryFrom<RawReportingRange> for ReportingRange {
    type Error = CoreError;

    fn try_from(raw: RawReportingRange) -> Result<Self, Self::Error> {
        let kind: RangeKind = raw.kind.parse()?;
        let bounds = match (kind, raw.bounds) {
            (RangeKind::Custom, Some(b)) => Some(RangeBounds::try_from(b)?),
            _ => None,
        };
        Ok(ReportingRange::new(kind, bounds))
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| CoreError::InvalidDate(format!("'{input}': {e}")))
}
