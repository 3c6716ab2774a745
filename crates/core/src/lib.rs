pub mod errors;
pub mod models;
pub mod services;

use chrono::{DateTime, Utc};
use models::{
    analytics::{ActivityHeatmap, SymbolTotal, TransactionSummary},
    bucket::Bucket,
    chart::{CumulativePoint, PerformancePoint},
    range::ReportingRange,
    settings::{ReportSettings, WeekStart},
    transaction::Transaction,
};
use services::{
    analytics_service::AnalyticsService,
    chart_service::ChartService,
    import_service::{ImportService, ImportedTransactions},
    range_service::{RangeService, ResolvedRange},
};

use errors::CoreError;

/// Default number of entries returned by [`TradeReports::top_symbols_default`].
pub const DEFAULT_TOP_SYMBOLS: usize = 5;

/// Main entry point for the trade-reports core library.
/// Holds the report settings and all services needed to build reports.
///
/// Every report takes the transaction snapshot, the range selector, and
/// "now" as explicit arguments; the struct keeps no transaction state.
#[must_use]
pub struct TradeReports {
    settings: ReportSettings,
    range_service: RangeService,
    chart_service: ChartService,
    analytics_service: AnalyticsService,
    import_service: ImportService,
}

impl std::fmt::Debug for TradeReports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeReports")
            .field("settings", &self.settings)
            .finish()
    }
}

impl TradeReports {
    /// Create a report builder with default settings (UTC-06:00, weeks start Monday).
    pub fn new() -> Self {
        Self::build(ReportSettings::default(), RangeService::default())
    }

    /// Create a report builder with custom settings. Settings are validated.
    pub fn with_settings(settings: ReportSettings) -> Result<Self, CoreError> {
        let range_service = RangeService::new(&settings)?;
        Ok(Self::build(settings, range_service))
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current settings.
    #[must_use]
    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Replace all settings. Nothing changes if validation fails.
    pub fn set_settings(&mut self, settings: ReportSettings) -> Result<(), CoreError> {
        self.range_service = RangeService::new(&settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Set the fixed reporting offset in minutes east of UTC (e.g. -360 for UTC-06:00).
    pub fn set_reporting_offset_minutes(&mut self, minutes: i32) -> Result<(), CoreError> {
        let settings = ReportSettings {
            reporting_offset_minutes: minutes,
            ..self.settings.clone()
        };
        self.set_settings(settings)
    }

    /// Set the first day of the Week axis.
    pub fn set_week_start(&mut self, week_start: WeekStart) -> Result<(), CoreError> {
        let settings = ReportSettings {
            week_starts_on: week_start,
            ..self.settings.clone()
        };
        self.set_settings(settings)
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Normalize REST JSON into transactions, failing on the first bad record.
    pub fn parse_transactions(&self, json: &str) -> Result<Vec<Transaction>, CoreError> {
        self.import_service.parse_transactions(json)
    }

    /// Normalize REST JSON into transactions, collecting bad records instead of failing.
    pub fn parse_transactions_lenient(&self, json: &str) -> Result<ImportedTransactions, CoreError> {
        self.import_service.parse_transactions_lenient(json)
    }

    // ── Range ───────────────────────────────────────────────────────

    /// Resolve a range selector into its concrete time axis.
    #[must_use]
    pub fn resolve_range(&self, range: &ReportingRange, now: DateTime<Utc>) -> ResolvedRange {
        self.range_service.resolve(range, now)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Performance series: running earned − invested per bucket.
    /// Empty for a `Custom` range without bounds.
    #[must_use]
    pub fn performance_series(
        &self,
        transactions: &[Transaction],
        range: &ReportingRange,
        now: DateTime<Utc>,
    ) -> Vec<PerformancePoint> {
        let resolved = self.resolve_range(range, now);
        self.chart_service.performance_series(transactions, &resolved)
    }

    /// Cumulative series: running invested and earned totals per bucket.
    /// Empty for a `Custom` range without bounds.
    #[must_use]
    pub fn cumulative_series(
        &self,
        transactions: &[Transaction],
        range: &ReportingRange,
        now: DateTime<Utc>,
    ) -> Vec<CumulativePoint> {
        let resolved = self.resolve_range(range, now);
        self.chart_service.cumulative_series(transactions, &resolved)
    }

    /// Per-bucket (non-cumulative) totals on the full axis.
    #[must_use]
    pub fn buckets(
        &self,
        transactions: &[Transaction],
        range: &ReportingRange,
        now: DateTime<Utc>,
    ) -> Vec<Bucket> {
        let resolved = self.resolve_range(range, now);
        self.chart_service.buckets(transactions, &resolved)
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Counts and invested / earned totals inside the range window.
    #[must_use]
    pub fn summary(
        &self,
        transactions: &[Transaction],
        range: &ReportingRange,
        now: DateTime<Utc>,
    ) -> TransactionSummary {
        let resolved = self.resolve_range(range, now);
        self.analytics_service.summary(transactions, &resolved)
    }

    /// Buy/sell counts per time bucket and time-of-day block.
    #[must_use]
    pub fn activity_heatmap(
        &self,
        transactions: &[Transaction],
        range: &ReportingRange,
        now: DateTime<Utc>,
    ) -> ActivityHeatmap {
        let resolved = self.resolve_range(range, now);
        self.analytics_service.activity_heatmap(transactions, &resolved)
    }

    /// Symbols ranked by traded amount inside the range window.
    #[must_use]
    pub fn top_symbols(
        &self,
        transactions: &[Transaction],
        range: &ReportingRange,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<SymbolTotal> {
        let resolved = self.resolve_range(range, now);
        self.analytics_service.top_symbols(transactions, &resolved, limit)
    }

    /// The top [`DEFAULT_TOP_SYMBOLS`] symbols.
    #[must_use]
    pub fn top_symbols_default(
        &self,
        transactions: &[Transaction],
        range: &ReportingRange,
        now: DateTime<Utc>,
    ) -> Vec<SymbolTotal> {
        self.top_symbols(transactions, range, now, DEFAULT_TOP_SYMBOLS)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: ReportSettings, range_service: RangeService) -> Self {
        Self {
            settings,
            range_service,
            chart_service: ChartService::new(),
            analytics_service: AnalyticsService::new(),
            import_service: ImportService::new(),
        }
    }
}

impl Default for TradeReports {
    fn default() -> Self {
        Self::new()
    }
}

/// Performance series with default settings.
#[must_use]
pub fn compute_performance_series(
    transactions: &[Transaction],
    range: &ReportingRange,
    now: DateTime<Utc>,
) -> Vec<PerformancePoint> {
    TradeReports::new().performance_series(transactions, range, now)
}

/// Cumulative series with default settings.
#[must_use]
pub fn compute_cumulative_series(
    transactions: &[Transaction],
    range: &ReportingRange,
    now: DateTime<Utc>,
) -> Vec<CumulativePoint> {
    TradeReports::new().cumulative_series(transactions, range, now)
}
