use crate::models::bucket::Bucket;
use crate::models::chart::{CumulativePoint, PerformancePoint};
use crate::models::transaction::Transaction;
use crate::services::aggregation_service::AggregationService;
use crate::services::axis_filler::AxisFiller;
use crate::services::range_service::ResolvedRange;

/// Generates chart-ready series from raw transactions.
///
/// The core computes all the numbers; the frontend only renders.
/// Both series share one pipeline:
/// 1. Group transactions into the resolved buckets (window-filtered)
/// 2. Fill every axis bucket, zero where nothing landed
/// 3. Walk the buckets in order producing running totals
pub struct ChartService {
    aggregation_service: AggregationService,
    axis_filler: AxisFiller,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
            axis_filler: AxisFiller::new(),
        }
    }

    /// Per-bucket totals on the full axis (no accumulation).
    #[must_use]
    pub fn buckets(&self, transactions: &[Transaction], resolved: &ResolvedRange) -> Vec<Bucket> {
        if resolved.is_empty() {
            return Vec::new();
        }
        let grouped = self.aggregation_service.group_by_bucket(transactions, resolved);
        self.axis_filler.fill(resolved, &grouped)
    }

    /// Performance (gains / losses) series: running net balance per bucket.
    #[must_use]
    pub fn performance_series(
        &self,
        transactions: &[Transaction],
        resolved: &ResolvedRange,
    ) -> Vec<PerformancePoint> {
        let buckets = self.buckets(transactions, resolved);
        self.aggregation_service.performance_series(&buckets)
    }

    /// Cumulative investment-vs-earnings series.
    #[must_use]
    pub fn cumulative_series(
        &self,
        transactions: &[Transaction],
        resolved: &ResolvedRange,
    ) -> Vec<CumulativePoint> {
        let buckets = self.buckets(transactions, resolved);
        self.aggregation_service.cumulative_series(&buckets)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
