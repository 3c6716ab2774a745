use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals of the transactions inside a reporting window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub transactions_count: usize,
    pub buy_count: usize,
    pub sell_count: usize,

    /// Sum of buy magnitudes
    pub invested_total: Decimal,

    /// Sum of sell magnitudes
    pub earned_total: Decimal,

    /// earned_total − invested_total
    pub net: Decimal,
}

/// Transaction counts for one (column, row) cell of the activity heatmap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCell {
    pub column: String,
    pub row: String,
    pub buy: usize,
    pub sell: usize,
    pub total: usize,
}

/// Activity grid: columns follow the resolved time axis, rows split each
/// column by time of day (or weekday for yearly views).
///
/// Cells are stored row-major and every (row, column) pair is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    pub columns: Vec<String>,
    pub rows: Vec<String>,
    pub cells: Vec<ActivityCell>,

    /// Largest cell total, at least 1 so it can be used as a divisor
    pub max_total: usize,
}

impl ActivityHeatmap {
    /// Look up a cell by its row and column positions.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&ActivityCell> {
        if row >= self.rows.len() || column >= self.columns.len() {
            return None;
        }
        self.cells.get(row * self.columns.len() + column)
    }
}

/// Total traded amount for one stock symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTotal {
    pub symbol: String,

    /// Sum of absolute amounts, buys and sells together
    pub amount: Decimal,

    pub transactions: usize,
}
