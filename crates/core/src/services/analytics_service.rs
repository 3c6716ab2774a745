use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::analytics::{ActivityCell, ActivityHeatmap, SymbolTotal, TransactionSummary};
use crate::models::range::RangeKind;
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::range_service::ResolvedRange;

/// Symbol used for transactions that carry no stock symbol.
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

const TIME_OF_DAY_BLOCKS: [&str; 4] = ["00–06h", "06–12h", "12–18h", "18–24h"];

/// Computes report analytics over the transactions inside a resolved window:
/// totals, activity heatmap, and top traded symbols.
///
/// Everything is derived from the same window the charts use, so the
/// numbers on the KPI cards always agree with the charts.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Counts and totals of buys and sells inside the window.
    #[must_use]
    pub fn summary(&self, transactions: &[Transaction], resolved: &ResolvedRange) -> TransactionSummary {
        let mut summary = TransactionSummary::default();

        for tx in in_window(transactions, resolved) {
            summary.transactions_count += 1;
            match tx.transaction_type {
                TransactionType::Buy => {
                    summary.buy_count += 1;
                    summary.invested_total = summary.invested_total.saturating_add(tx.magnitude());
                }
                TransactionType::Sell => {
                    summary.sell_count += 1;
                    summary.earned_total = summary.earned_total.saturating_add(tx.magnitude());
                }
            }
        }

        summary.net = summary.earned_total - summary.invested_total;
        summary
    }

    /// Transaction counts per (time bucket, time-of-day block).
    ///
    /// Rows depend on the range kind:
    /// - `Today`: a single `Activity` row
    /// - `Week` / `Month`: four 6-hour blocks of the local day
    /// - `Year`: weekdays, starting at the configured first day of week
    /// - `Custom`: a single `All` row
    #[must_use]
    pub fn activity_heatmap(
        &self,
        transactions: &[Transaction],
        resolved: &ResolvedRange,
    ) -> ActivityHeatmap {
        if resolved.is_empty() {
            return ActivityHeatmap {
                max_total: 1,
                ..ActivityHeatmap::default()
            };
        }

        let columns: Vec<String> = resolved.axis().iter().map(|k| k.label.clone()).collect();
        let rows = row_labels(resolved.kind(), resolved.week_start());

        let mut cells: Vec<ActivityCell> = rows
            .iter()
            .flat_map(|row| {
                columns.iter().map(move |column| ActivityCell {
                    column: column.clone(),
                    row: row.clone(),
                    ..ActivityCell::default()
                })
            })
            .collect();

        for tx in transactions {
            let local = resolved.to_local(tx.created_at);
            let Some(column) = resolved.bucket_of(local) else {
                continue;
            };
            let row = row_of(resolved.kind(), resolved.week_start(), local);
            if let Some(cell) = cells.get_mut(row * columns.len() + column) {
                match tx.transaction_type {
                    TransactionType::Buy => cell.buy += 1,
                    TransactionType::Sell => cell.sell += 1,
                }
                cell.total += 1;
            }
        }

        let max_total = cells.iter().map(|c| c.total).max().unwrap_or(0).max(1);

        ActivityHeatmap {
            columns,
            rows,
            cells,
            max_total,
        }
    }

    /// Symbols ranked by total traded amount (buys and sells together).
    ///
    /// Ties are broken alphabetically so the ranking is deterministic.
    #[must_use]
    pub fn top_symbols(
        &self,
        transactions: &[Transaction],
        resolved: &ResolvedRange,
        limit: usize,
    ) -> Vec<SymbolTotal> {
        let mut by_symbol: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();

        for tx in in_window(transactions, resolved) {
            let symbol = tx.symbol.as_deref().unwrap_or(UNKNOWN_SYMBOL);
            let entry = by_symbol.entry(symbol).or_insert((Decimal::ZERO, 0));
            entry.0 = entry.0.saturating_add(tx.magnitude());
            entry.1 += 1;
        }

        let mut totals: Vec<SymbolTotal> = by_symbol
            .into_iter()
            .map(|(symbol, (amount, transactions))| SymbolTotal {
                symbol: symbol.to_string(),
                amount,
                transactions,
            })
            .collect();

        totals.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.symbol.cmp(&b.symbol)));
        debug!(symbols = totals.len(), limit, "ranked symbols by traded amount");
        totals.truncate(limit);
        totals
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

fn in_window<'a>(
    transactions: &'a [Transaction],
    resolved: &'a ResolvedRange,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |tx| resolved.bucket_of_instant(tx.created_at).is_some())
}

fn weekdays_from(start: Weekday) -> Vec<Weekday> {
    std::iter::successors(Some(start), |d| Some(d.succ()))
        .take(7)
        .collect()
}

fn row_labels(kind: RangeKind, week_start: Weekday) -> Vec<String> {
    match kind {
        RangeKind::Today => vec!["Activity".to_string()],
        RangeKind::Week | RangeKind::Month => {
            TIME_OF_DAY_BLOCKS.iter().map(|s| s.to_string()).collect()
        }
        RangeKind::Year => weekdays_from(week_start).iter().map(|d| d.to_string()).collect(),
        RangeKind::Custom => vec!["All".to_string()],
    }
}

fn row_of(kind: RangeKind, week_start: Weekday, local: NaiveDateTime) -> usize {
    match kind {
        RangeKind::Week | RangeKind::Month => (local.hour() / 6) as usize,
        RangeKind::Year => {
            let day = local.weekday().num_days_from_monday();
            ((7 + day - week_start.num_days_from_monday()) % 7) as usize
        }
        RangeKind::Today | RangeKind::Custom => 0,
    }
}
