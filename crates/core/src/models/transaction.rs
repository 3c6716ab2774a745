use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// Largest accepted amount magnitude (10^15). Keeps the running sums of
/// any realistic batch far below `Decimal::MAX`.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// Direction of a trade.
///
/// Classification is purely by type: a buy always counts as money
/// invested, a sell always as money earned, whatever the sign of the
/// stored amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Purchase of stock (money invested)
    Buy,
    /// Sale of stock (money earned)
    Sell,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "buy"),
            TransactionType::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionType::Buy),
            "sell" => Ok(TransactionType::Sell),
            _ => Err(CoreError::InvalidTransactionType(s.to_string())),
        }
    }
}

/// A single normalized buy/sell record.
///
/// Built from a [`RawTransaction`] at the input boundary; once constructed
/// it is immutable input to the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransaction")]
pub struct Transaction {
    /// Backend identifier, if the record carried one
    pub id: Option<String>,

    /// Human-facing transaction code (e.g., "TX-0042")
    pub code: Option<String>,

    /// Source-of-truth instant of the trade
    pub created_at: DateTime<Utc>,

    /// Buy or Sell
    pub transaction_type: TransactionType,

    /// Total amount as stored by the backend. Only the magnitude is used.
    pub amount: Decimal,

    /// Ticker of the traded stock, uppercased
    pub symbol: Option<String>,
}

impl Transaction {
    pub fn new(transaction_type: TransactionType, amount: Decimal, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            code: None,
            created_at,
            transaction_type,
            amount,
            symbol: None,
        }
    }

    pub fn buy(amount: Decimal, created_at: DateTime<Utc>) -> Self {
        Self::new(TransactionType::Buy, amount, created_at)
    }

    pub fn sell(amount: Decimal, created_at: DateTime<Utc>) -> Self {
        Self::new(TransactionType::Sell, amount, created_at)
    }

    /// Attach a stock symbol (uppercased).
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into().trim().to_uppercase());
        self
    }

    /// Attach a backend identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Absolute value of the amount.
    #[must_use]
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

}

/// A transaction record exactly as the REST backend returns it.
///
/// Fields are loosely typed on purpose (ids may be numbers or strings,
/// amounts may be numbers or numeric strings). Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(alias = "createdAt", alias = "date")]
    pub created_at: String,

    #[serde(alias = "type")]
    pub transaction_type: String,

    #[serde(alias = "amount")]
    pub total_amount: Value,

    #[serde(default, alias = "symbol")]
    pub stock_symbol: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = CoreError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&raw.created_at)?;
        let transaction_type = raw.transaction_type.parse()?;
        let amount = parse_amount(&raw.total_amount)?;

        let id = match raw.id {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };

        let symbol = raw
            .stock_symbol
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());

        Ok(Transaction {
            id,
            code: raw.code,
            created_at,
            transaction_type,
            amount,
            symbol,
        })
    }
}

/// Parse a backend timestamp into a UTC instant.
///
/// Accepted shapes:
/// - RFC 3339 with offset (`2025-01-05T14:30:00-06:00`, `...Z`)
/// - the same with a space separator
/// - naive date-time without offset, read as UTC
/// - a bare `YYYY-MM-DD`, read as UTC midnight
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, CoreError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(CoreError::InvalidTimestamp(format!("'{input}' is not a recognized date-time")))
}

/// Parse an amount given as a JSON number or a numeric string.
///
/// Non-numeric input is an error, never zero: a silently defaulted amount
/// would corrupt the totals. Magnitudes above [`MAX_AMOUNT_UNITS`] are
/// rejected.
pub fn parse_amount(value: &Value) -> Result<Decimal, CoreError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(CoreError::InvalidAmount(format!(
                "expected a number or numeric string, got {other}"
            )))
        }
    };

    if text.is_empty() {
        return Err(CoreError::InvalidAmount("empty amount".to_string()));
    }

    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| CoreError::InvalidAmount(format!("'{text}' is not numeric")))?;

    if amount.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(CoreError::InvalidAmount(format!(
            "'{text}' exceeds the maximum of {MAX_AMOUNT_UNITS}"
        )));
    }
    Ok(amount)
}
