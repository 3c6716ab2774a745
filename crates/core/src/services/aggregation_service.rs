use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::bucket::{Bucket, BucketTotals};
use crate::models::chart::{CumulativePoint, PerformancePoint};
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::range_service::ResolvedRange;

/// Transactions folded into axis positions. Sparse: only buckets that
/// received at least one transaction are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedTransactions {
    /// Axis position → totals
    pub buckets: BTreeMap<usize, BucketTotals>,

    /// Transactions that landed in a bucket
    pub included: usize,

    /// Transactions outside the resolved window
    pub excluded: usize,
}

/// Folds buy/sell transactions into buckets and projects the filled axis
/// into chart series.
///
/// Pure business logic with no I/O and no clock.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Accumulate `invested` (buys) and `earned` (sells) per bucket.
    ///
    /// Amounts contribute by magnitude; the stored sign is ignored. Sums
    /// saturate at `Decimal::MAX` instead of overflowing.
    /// Transactions whose local timestamp is outside the window are skipped.
    pub fn group_by_bucket(
        &self,
        transactions: &[Transaction],
        resolved: &ResolvedRange,
    ) -> GroupedTransactions {
        let mut grouped = GroupedTransactions::default();

        for tx in transactions {
            let Some(idx) = resolved.bucket_of_instant(tx.created_at) else {
                grouped.excluded += 1;
                continue;
            };

            let totals = grouped.buckets.entry(idx).or_default();
            match tx.transaction_type {
                TransactionType::Buy => totals.invested = totals.invested.saturating_add(tx.magnitude()),
                TransactionType::Sell => totals.earned = totals.earned.saturating_add(tx.magnitude()),
            }
            totals.transactions += 1;
            grouped.included += 1;
        }

        debug!(
            kind = %resolved.kind(),
            included = grouped.included,
            excluded = grouped.excluded,
            buckets = grouped.buckets.len(),
            "grouped transactions into buckets"
        );
        grouped
    }

    /// Running net balance per bucket.
    ///
    /// For each bucket in order, its invested/earned amounts are added to
    /// running accumulators and `net = earned_acc - invested_acc` is emitted.
    #[must_use]
    pub fn performance_series(&self, buckets: &[Bucket]) -> Vec<PerformancePoint> {
        let mut invested_acc = Decimal::ZERO;
        let mut earned_acc = Decimal::ZERO;

        buckets
            .iter()
            .map(|bucket| {
                invested_acc = invested_acc.saturating_add(bucket.totals.invested);
                earned_acc = earned_acc.saturating_add(bucket.totals.earned);
                let net = earned_acc - invested_acc;

                PerformancePoint {
                    label: bucket.key.label.clone(),
                    order: bucket.key.order,
                    net,
                    positive: net.max(Decimal::ZERO),
                    negative: net.min(Decimal::ZERO),
                }
            })
            .collect()
    }

    /// Independent running totals of invested and earned per bucket.
    #[must_use]
    pub fn cumulative_series(&self, buckets: &[Bucket]) -> Vec<CumulativePoint> {
        let mut invested_acc = Decimal::ZERO;
        let mut earned_acc = Decimal::ZERO;

        buckets
            .iter()
            .map(|bucket| {
                invested_acc = invested_acc.saturating_add(bucket.totals.invested);
                earned_acc = earned_acc.saturating_add(bucket.totals.earned);

                CumulativePoint {
                    label: bucket.key.label.clone(),
                    order: bucket.key.order,
                    invested: invested_acc,
                    earned: earned_acc,
                }
            })
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
