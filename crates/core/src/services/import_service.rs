use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::errors::CoreError;
use crate::models::transaction::{RawTransaction, Transaction};

/// Result of a lenient import: the records that normalized cleanly plus
/// one `CoreError::InvalidRecord` per rejected record.
#[derive(Debug, Default)]
pub struct ImportedTransactions {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<CoreError>,
}

/// The backend summary payload; only the transaction list is read.
#[derive(Debug, Deserialize)]
struct SummaryPayload {
    transactions: Vec<Value>,
}

/// Normalizes loosely-typed REST JSON into [`Transaction`]s.
///
/// This is the only place external record shapes are checked; everything
/// downstream works on validated transactions.
pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    /// Parse a bare JSON array of records or a summary object with a
    /// `transactions` array. All-or-nothing: the first bad record fails
    /// the whole batch and the error names its index.
    pub fn parse_transactions(&self, json: &str) -> Result<Vec<Transaction>, CoreError> {
        Self::records(json)?
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self::normalize(record).map_err(|e| e.at_record(index)))
            .collect()
    }

    /// Like [`parse_transactions`](Self::parse_transactions), but keeps the
    /// good records and reports the bad ones instead of failing.
    ///
    /// The document itself must still be valid JSON of a supported shape.
    pub fn parse_transactions_lenient(&self, json: &str) -> Result<ImportedTransactions, CoreError> {
        let mut imported = ImportedTransactions::default();

        for (index, record) in Self::records(json)?.into_iter().enumerate() {
            match Self::normalize(record) {
                Ok(tx) => imported.transactions.push(tx),
                Err(e) => {
                    trace!(index, error = %e, "skipping malformed transaction record");
                    imported.rejected.push(e.at_record(index));
                }
            }
        }

        Ok(imported)
    }

    fn records(json: &str) -> Result<Vec<Value>, CoreError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => Ok(items),
            obj @ Value::Object(_) => {
                let payload: SummaryPayload = serde_json::from_value(obj)?;
                Ok(payload.transactions)
            }
            other => Err(CoreError::Deserialization(format!(
                "expected an array of transactions or an object with 'transactions', got {other}"
            ))),
        }
    }

    fn normalize(record: Value) -> Result<Transaction, CoreError> {
        let raw: RawTransaction = serde_json::from_value(record)?;
        Transaction::try_from(raw)
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new()
    }
}
