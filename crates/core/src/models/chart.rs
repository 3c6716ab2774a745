use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of the performance (gains / losses) series.
///
/// `net` is the running earned-minus-invested balance up to and including
/// this bucket. It is split into `positive` and `negative` so the frontend
/// can draw two area fills that never overlap: at most one is nonzero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// Axis label
    pub label: String,

    /// Start of the bucket in the reporting timezone
    pub order: NaiveDateTime,

    /// Running earned − running invested
    pub net: Decimal,

    /// `max(net, 0)`
    pub positive: Decimal,

    /// `min(net, 0)`
    pub negative: Decimal,
}

/// One point of the cumulative investment-vs-earnings series.
///
/// Both values are running totals frozen at this bucket; they never net
/// against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// Axis label
    pub label: String,

    /// Start of the bucket in the reporting timezone
    pub order: NaiveDateTime,

    /// Sum of buy magnitudes from the start of the range through this bucket
    pub invested: Decimal,

    /// Sum of sell magnitudes from the start of the range through this bucket
    pub earned: Decimal,
}
