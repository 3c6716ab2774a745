// ═══════════════════════════════════════════════════════════════════
// Model Tests: TransactionType, Transaction boundary, RangeKind,
// ReportingRange, BucketKey, ReportSettings, analytics models
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use trade_reports_core::errors::CoreError;
use trade_reports_core::models::analytics::{ActivityCell, ActivityHeatmap};
use trade_reports_core::models::bucket::{Bucket, BucketKey};
use trade_reports_core::models::range::{
    parse_calendar_date, RangeBounds, RangeKind, RawReportingRange, ReportingRange,
};
use trade_reports_core::models::settings::{ReportSettings, WeekStart, DEFAULT_REPORTING_OFFSET_MINUTES};
use trade_reports_core::models::transaction::{
    parse_amount, parse_timestamp, RawTransaction, Transaction, TransactionType, MAX_AMOUNT_UNITS,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn raw(created_at: &str, kind: &str, amount: serde_json::Value) -> RawTransaction {
    serde_json::from_value(json!({
        "created_at": created_at,
        "transaction_type": kind,
        "total_amount": amount,
    }))
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionType
// ═══════════════════════════════════════════════════════════════════

mod transaction_type {
    use super::*;

    #[test]
    fn display_is_lowercase() {
        assert_eq!(TransactionType::Buy.to_string(), "buy");
        assert_eq!(TransactionType::Sell.to_string(), "sell");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("BUY".parse::<TransactionType>().unwrap(), TransactionType::Buy);
        assert_eq!(" Sell ".parse::<TransactionType>().unwrap(), TransactionType::Sell);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "transfer".parse::<TransactionType>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransactionType(ref s) if s == "transfer"));
    }

    #[test]
    fn serializes_in_wire_casing() {
        assert_eq!(serde_json::to_string(&TransactionType::Buy).unwrap(), "\"buy\"");
        let back: TransactionType = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(back, TransactionType::Sell);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Timestamp & amount parsing
// ═══════════════════════════════════════════════════════════════════

mod parsing {
    use super::*;

    #[test]
    fn rfc3339_with_offset_is_converted_to_utc() {
        let ts = parse_timestamp("2025-01-05T14:30:00-06:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 5, 20, 30, 0).unwrap());
    }

    #[test]
    fn rfc3339_zulu() {
        let ts = parse_timestamp("2025-01-05T14:30:00.123Z").unwrap();
        assert_eq!(ts.date_naive(), d(2025, 1, 5));
    }

    #[test]
    fn space_separated_with_offset() {
        let ts = parse_timestamp("2025-01-05 14:30:00+00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap());
    }

    #[test]
    fn naive_datetime_is_read_as_utc() {
        let ts = parse_timestamp("2025-01-05T14:30:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap());
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        let ts = parse_timestamp("2025-01-05").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn garbage_timestamp_fails() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, CoreError::InvalidTimestamp(_)));
    }

    #[test]
    fn amount_from_number() {
        assert_eq!(parse_amount(&json!(1230.75)).unwrap(), dec!(1230.75));
        assert_eq!(parse_amount(&json!(-920)).unwrap(), dec!(-920));
    }

    #[test]
    fn amount_from_numeric_string() {
        assert_eq!(parse_amount(&json!("410.25")).unwrap(), dec!(410.25));
        assert_eq!(parse_amount(&json!("  7 ")).unwrap(), dec!(7));
    }

    #[test]
    fn amount_in_scientific_notation() {
        assert_eq!(parse_amount(&json!("1.5e3")).unwrap(), dec!(1500));
    }

    #[test]
    fn non_numeric_amount_is_an_error_not_zero() {
        assert!(matches!(parse_amount(&json!("abc")).unwrap_err(), CoreError::InvalidAmount(_)));
        assert!(matches!(parse_amount(&json!("")).unwrap_err(), CoreError::InvalidAmount(_)));
        assert!(matches!(parse_amount(&json!(null)).unwrap_err(), CoreError::InvalidAmount(_)));
        assert!(matches!(parse_amount(&json!(true)).unwrap_err(), CoreError::InvalidAmount(_)));
    }

    #[test]
    fn amount_at_cap_is_accepted() {
        let cap = Decimal::from(MAX_AMOUNT_UNITS);
        assert_eq!(parse_amount(&json!("1000000000000000")).unwrap(), cap);
        assert_eq!(parse_amount(&json!("-1000000000000000")).unwrap(), -cap);
    }

    #[test]
    fn amount_above_cap_is_rejected() {
        for value in [json!("1000000000000000.01"), json!("-2e15"), json!("79228162514264337593543950335")] {
            let err = parse_amount(&value).unwrap_err();
            assert!(matches!(err, CoreError::InvalidAmount(_)), "{value}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn try_from_raw_record() {
        let record: RawTransaction = serde_json::from_value(json!({
            "id": 42,
            "code": "TX-0042",
            "created_at": "2025-09-16T10:00:00Z",
            "transaction_type": "sell",
            "total_amount": "1230.75",
            "stock_symbol": "msft",
            "is_active": true,
            "details": [{"stock": "Microsoft", "quantity": 3}]
        }))
        .unwrap();

        let tx = Transaction::try_from(record).unwrap();
        assert_eq!(tx.id.as_deref(), Some("42"));
        assert_eq!(tx.code.as_deref(), Some("TX-0042"));
        assert_eq!(tx.transaction_type, TransactionType::Sell);
        assert_eq!(tx.amount, dec!(1230.75));
        assert_eq!(tx.symbol.as_deref(), Some("MSFT"));
    }

    #[test]
    fn string_id_is_kept_verbatim() {
        let mut record = raw("2025-09-16", "buy", json!(1));
        record.id = Some(json!("abc-1"));
        let tx = Transaction::try_from(record).unwrap();
        assert_eq!(tx.id.as_deref(), Some("abc-1"));
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let record: RawTransaction = serde_json::from_value(json!({
            "createdAt": "2025-09-16",
            "type": "BUY",
            "amount": 5,
            "symbol": "nvda"
        }))
        .unwrap();
        let tx = Transaction::try_from(record).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Buy);
        assert_eq!(tx.symbol.as_deref(), Some("NVDA"));
    }

    #[test]
    fn blank_symbol_becomes_none() {
        let mut record = raw("2025-09-16", "buy", json!(1));
        record.stock_symbol = Some("   ".into());
        assert_eq!(Transaction::try_from(record).unwrap().symbol, None);
    }

    #[test]
    fn bad_type_is_rejected() {
        let err = Transaction::try_from(raw("2025-09-16", "hold", json!(1))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransactionType(_)));
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let err = Transaction::try_from(raw("16/09/2025", "buy", json!(1))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTimestamp(_)));
    }

    #[test]
    fn bad_amount_is_rejected() {
        let err = Transaction::try_from(raw("2025-09-16", "buy", json!("lots"))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAmount(_)));
    }

    #[test]
    fn magnitude_ignores_sign() {
        let at = Utc.with_ymd_and_hms(2025, 9, 14, 0, 0, 0).unwrap();
        assert_eq!(Transaction::buy(dec!(-920), at).magnitude(), dec!(920));
        assert_eq!(Transaction::sell(dec!(920), at).magnitude(), dec!(920));
    }

    #[test]
    fn builders_set_symbol_and_id() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let tx = Transaction::buy(dec!(1), at).with_symbol(" aapl ").with_id("7");
        assert_eq!(tx.symbol.as_deref(), Some("AAPL"));
        assert_eq!(tx.id.as_deref(), Some("7"));
    }

    #[test]
    fn serde_roundtrip_json() {
        let at = Utc.with_ymd_and_hms(2025, 3, 2, 8, 15, 0).unwrap();
        let tx = Transaction::sell(dec!(99.95), at).with_symbol("AMZN").with_id("9");
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }

    #[test]
    fn deserializing_invalid_record_fails() {
        let result: Result<Transaction, _> = serde_json::from_value(json!({
            "created_at": "2025-09-16",
            "transaction_type": "buy",
            "total_amount": "n/a"
        }));
        assert!(result.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RangeKind / ReportingRange
// ═══════════════════════════════════════════════════════════════════

mod reporting_range {
    use super::*;

    #[test]
    fn kind_parse_and_display() {
        for kind in [RangeKind::Today, RangeKind::Week, RangeKind::Month, RangeKind::Year, RangeKind::Custom] {
            assert_eq!(kind.to_string().parse::<RangeKind>().unwrap(), kind);
        }
        assert_eq!("day".parse::<RangeKind>().unwrap(), RangeKind::Today);
        assert_eq!("MONTH".parse::<RangeKind>().unwrap(), RangeKind::Month);
    }

    #[test]
    fn unknown_kind_fails() {
        let err = "Quarter".parse::<RangeKind>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidRangeKind(_)));
    }

    #[test]
    fn bounds_reject_start_after_end() {
        let err = RangeBounds::new(d(2025, 1, 5), d(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
    }

    #[test]
    fn single_day_bounds_are_valid() {
        let b = RangeBounds::new(d(2025, 1, 5), d(2025, 1, 5)).unwrap();
        assert_eq!(b.start, b.end);
    }

    #[test]
    fn bounds_dropped_for_non_custom_kinds() {
        let bounds = RangeBounds::new(d(2025, 1, 1), d(2025, 1, 5)).unwrap();
        let range = ReportingRange::new(RangeKind::Week, Some(bounds));
        assert_eq!(range.bounds, None);
    }

    #[test]
    fn raw_custom_range_parses() {
        let raw: RawReportingRange = serde_json::from_value(json!({
            "rangeType": "Custom",
            "rangeDates": { "start": "2025-01-01", "end": "2025-01-05" }
        }))
        .unwrap();
        let range = ReportingRange::try_from(raw).unwrap();
        assert_eq!(range.kind, RangeKind::Custom);
        assert_eq!(range.bounds.unwrap().start, d(2025, 1, 1));
    }

    #[test]
    fn raw_custom_without_bounds_is_valid() {
        let range: ReportingRange = serde_json::from_value(json!({
            "kind": "Custom",
            "bounds": null
        }))
        .unwrap();
        assert_eq!(range, ReportingRange::custom_unbounded());
    }

    #[test]
    fn raw_inverted_bounds_fail() {
        let result: Result<ReportingRange, _> = serde_json::from_value(json!({
            "kind": "Custom",
            "bounds": { "start": "2025-02-01", "end": "2025-01-01" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn raw_bad_date_fails() {
        let raw = RawReportingRange {
            kind: "Custom".into(),
            bounds: Some(trade_reports_core::models::range::RawRangeBounds {
                start: "2025-13-01".into(),
                end: "2025-12-31".into(),
            }),
        };
        assert!(matches!(ReportingRange::try_from(raw).unwrap_err(), CoreError::InvalidDate(_)));
    }

    #[test]
    fn calendar_date_parser() {
        assert_eq!(parse_calendar_date(" 2025-02-28 ").unwrap(), d(2025, 2, 28));
        assert!(parse_calendar_date("2025-02-30").is_err());
    }

    #[test]
    fn serde_roundtrip_json() {
        let range = ReportingRange::custom(d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        let back: ReportingRange = serde_json::from_str(&json).unwrap();
        assert_eq!(range, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  BucketKey / Bucket
// ═══════════════════════════════════════════════════════════════════

mod bucket {
    use super::*;

    #[test]
    fn ordering_uses_instant_not_label() {
        let mon = BucketKey {
            label: "Mon".into(),
            order: d(2025, 6, 9).and_hms_opt(0, 0, 0).unwrap(),
        };
        let sun = BucketKey {
            label: "Sun".into(),
            order: d(2025, 6, 8).and_hms_opt(0, 0, 0).unwrap(),
        };
        // Alphabetically "Mon" < "Sun", chronologically Sunday comes first.
        assert!(sun < mon);
    }

    #[test]
    fn empty_bucket_has_zero_totals() {
        let b = Bucket::empty(BucketKey {
            label: "1".into(),
            order: d(2025, 6, 1).and_hms_opt(0, 0, 0).unwrap(),
        });
        assert!(b.is_empty());
        assert_eq!(b.totals.invested, Decimal::ZERO);
        assert_eq!(b.totals.earned, Decimal::ZERO);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ReportSettings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = ReportSettings::default();
        assert_eq!(s.reporting_offset_minutes, DEFAULT_REPORTING_OFFSET_MINUTES);
        assert_eq!(s.week_starts_on, WeekStart::Monday);
        assert_eq!(s.reporting_offset().unwrap().local_minus_utc(), -6 * 3600);
    }

    #[test]
    fn out_of_range_offset_rejected() {
        let s = ReportSettings {
            reporting_offset_minutes: 15 * 60,
            ..ReportSettings::default()
        };
        assert!(matches!(s.validate().unwrap_err(), CoreError::InvalidOffset(900)));
    }

    #[test]
    fn extreme_valid_offsets_accepted() {
        for minutes in [-14 * 60, 14 * 60, 0, 330] {
            let s = ReportSettings {
                reporting_offset_minutes: minutes,
                ..ReportSettings::default()
            };
            assert!(s.validate().is_ok(), "offset {minutes} should be valid");
        }
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let s = ReportSettings::from_json("{}").unwrap();
        assert_eq!(s, ReportSettings::default());

        let s = ReportSettings::from_json(r#"{"week_starts_on":"Sunday"}"#).unwrap();
        assert_eq!(s.week_starts_on, WeekStart::Sunday);
    }

    #[test]
    fn from_json_validates() {
        let err = ReportSettings::from_json(r#"{"reporting_offset_minutes": 100000}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOffset(_)));
    }

    #[test]
    fn json_roundtrip() {
        let s = ReportSettings {
            reporting_offset_minutes: 60,
            week_starts_on: WeekStart::Sunday,
        };
        assert_eq!(ReportSettings::from_json(&s.to_json().unwrap()).unwrap(), s);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ActivityHeatmap
// ═══════════════════════════════════════════════════════════════════

mod activity_heatmap {
    use super::*;

    #[test]
    fn cell_lookup_is_row_major() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let rows = vec!["r1".to_string(), "r2".to_string()];
        let cells = rows
            .iter()
            .flat_map(|r| {
                columns.iter().map(move |c| ActivityCell {
                    column: c.clone(),
                    row: r.clone(),
                    ..ActivityCell::default()
                })
            })
            .collect();
        let map = ActivityHeatmap {
            columns,
            rows,
            cells,
            max_total: 1,
        };
        let cell = map.cell(1, 0).unwrap();
        assert_eq!((cell.row.as_str(), cell.column.as_str()), ("r2", "a"));
        assert!(map.cell(2, 0).is_none());
        assert!(map.cell(0, 2).is_none());
    }
}
