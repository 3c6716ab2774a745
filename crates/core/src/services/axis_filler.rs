use crate::models::bucket::Bucket;
use crate::services::aggregation_service::GroupedTransactions;
use crate::services::range_service::ResolvedRange;

/// Expands sparse grouped totals onto the full resolved axis.
///
/// Every axis bucket appears exactly once, in chronological order; buckets
/// that received no transactions are zero-valued rather than absent, so
/// running totals stay flat across gaps instead of jumping.
pub struct AxisFiller;

impl AxisFiller {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn fill(&self, resolved: &ResolvedRange, grouped: &GroupedTransactions) -> Vec<Bucket> {
        let buckets: Vec<Bucket> = resolved
            .axis()
            .iter()
            .enumerate()
            .map(|(idx, key)| match grouped.buckets.get(&idx) {
                Some(totals) => Bucket {
                    key: key.clone(),
                    totals: totals.clone(),
                },
                None => Bucket::empty(key.clone()),
            })
            .collect();

        debug_assert!(buckets.windows(2).all(|w| w[0].key.order < w[1].key.order));
        buckets
    }
}

impl Default for AxisFiller {
    fn default() -> Self {
        Self::new()
    }
}
