use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of one point on the time axis.
///
/// `label` is what gets displayed and is NOT unique across ranges
/// (weekday names repeat every week), so every bucket also carries
/// `order`: the local instant its period starts at. Sorting always
/// uses `order`, never `label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    /// Display label, e.g. "09:00", "Mon", "17", "Mar", "Jan 5"
    pub label: String,

    /// Start of the bucket's period in the reporting timezone
    pub order: NaiveDateTime,
}

impl PartialOrd for BucketKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BucketKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.label.cmp(&other.label))
    }
}

/// Per-bucket totals before any running accumulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotals {
    /// Sum of buy magnitudes
    pub invested: Decimal,

    /// Sum of sell magnitudes
    pub earned: Decimal,

    /// Number of transactions folded in
    pub transactions: usize,
}

/// A bucket on the filled axis: key plus its own (non-cumulative) totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: BucketKey,

    #[serde(flatten)]
    pub totals: BucketTotals,
}

impl Bucket {
    /// A bucket with no transactions.
    pub fn empty(key: BucketKey) -> Self {
        Self {
            key,
            totals: BucketTotals::default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.transactions == 0
    }
}
