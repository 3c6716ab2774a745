use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc, Weekday};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::bucket::BucketKey;
use crate::models::range::{RangeKind, ReportingRange};
use crate::models::settings::{ReportSettings, WeekStart};

/// A reporting range turned into a concrete, gap-free time axis.
///
/// The axis is ordered chronologically and contains every bucket that
/// must be drawn, whether or not any transaction falls in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    kind: RangeKind,
    offset: FixedOffset,
    week_start: Weekday,
    window: Option<(NaiveDate, NaiveDate)>,
    axis: Vec<BucketKey>,
}

impl ResolvedRange {
    /// An axis with no buckets. Nothing maps into it.
    fn empty(kind: RangeKind, offset: FixedOffset, week_start: Weekday) -> Self {
        Self {
            kind,
            offset,
            week_start,
            window: None,
            axis: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> RangeKind {
        self.kind
    }

    /// The reporting timezone every timestamp is normalized into.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// First weekday of the Week axis (also orders weekday rows elsewhere).
    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Inclusive local calendar window, or `None` when the axis is empty.
    #[must_use]
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.window
    }

    #[must_use]
    pub fn axis(&self) -> &[BucketKey] {
        &self.axis
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// Convert an instant to wall-clock time in the reporting timezone.
    #[must_use]
    pub fn to_local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset).naive_local()
    }

    /// Axis position of a local timestamp, or `None` if it falls outside
    /// the window.
    #[must_use]
    pub fn bucket_of(&self, local: NaiveDateTime) -> Option<usize> {
        let (start, end) = self.window?;
        let date = local.date();
        if date < start || date > end {
            return None;
        }

        let idx = match self.kind {
            RangeKind::Today => local.hour() as usize,
            RangeKind::Year => date.month0() as usize,
            RangeKind::Week | RangeKind::Month | RangeKind::Custom => {
                (date - start).num_days() as usize
            }
        };
        (idx < self.axis.len()).then_some(idx)
    }

    /// Axis position of a UTC instant after timezone normalization.
    #[must_use]
    pub fn bucket_of_instant(&self, at: DateTime<Utc>) -> Option<usize> {
        self.bucket_of(self.to_local(at))
    }

    /// Label of the bucket a UTC instant falls into.
    #[must_use]
    pub fn key_of(&self, at: DateTime<Utc>) -> Option<&BucketKey> {
        self.bucket_of_instant(at).and_then(|idx| self.axis.get(idx))
    }
}

/// Translates a [`ReportingRange`] into a [`ResolvedRange`].
///
/// "Now" is always passed in explicitly; nothing here reads the clock.
/// Pure logic, no I/O.
pub struct RangeService {
    offset: FixedOffset,
    week_start: WeekStart,
}

impl RangeService {
    /// Build a resolver from validated settings.
    pub fn new(settings: &ReportSettings) -> Result<Self, CoreError> {
        Ok(Self {
            offset: settings.reporting_offset()?,
            week_start: settings.week_starts_on,
        })
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Resolve a range relative to `now`.
    ///
    /// - `Today`: 24 hourly buckets of the local day containing `now`
    /// - `Week`: 7 daily buckets of the week containing `now`
    /// - `Month`: one bucket per day of the month containing `now`
    /// - `Year`: 12 monthly buckets of the year containing `now`
    /// - `Custom`: one bucket per day in `start..=end`; empty without bounds
    pub fn resolve(&self, range: &ReportingRange, now: DateTime<Utc>) -> ResolvedRange {
        let week_start = self.week_start.weekday();
        let today = now.with_timezone(&self.offset).date_naive();

        let window = match range.kind {
            RangeKind::Today => Some((today, today)),
            RangeKind::Week => week_window(today, week_start),
            RangeKind::Month => month_window(today),
            RangeKind::Year => year_window(today),
            RangeKind::Custom => match range.bounds {
                Some(bounds) => Some((bounds.start, bounds.end)),
                None => {
                    warn!("custom range has no bounds, resolving to an empty axis");
                    None
                }
            },
        };

        let Some((start, end)) = window else {
            return ResolvedRange::empty(range.kind, self.offset, week_start);
        };

        let axis = build_axis(range.kind, start, end);
        debug!(
            kind = %range.kind,
            %start,
            %end,
            buckets = axis.len(),
            "resolved reporting range"
        );

        ResolvedRange {
            kind: range.kind,
            offset: self.offset,
            week_start,
            window: Some((start, end)),
            axis,
        }
    }
}

impl Default for RangeService {
    fn default() -> Self {
        let settings = ReportSettings::default();
        Self {
            offset: settings
                .reporting_offset()
                .unwrap_or_else(|_| chrono::Offset::fix(&Utc)),
            week_start: settings.week_starts_on,
        }
    }
}

// ── Calendar helpers ────────────────────────────────────────────────

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn week_window(today: NaiveDate, week_start: Weekday) -> Option<(NaiveDate, NaiveDate)> {
    let back = (7 + today.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let start = today.checked_sub_signed(Duration::days(i64::from(back)))?;
    let end = start.checked_add_signed(Duration::days(6))?;
    Some((start, end))
}

fn month_window(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = today.with_day(1)?;
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

fn year_window(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
    let end = NaiveDate::from_ymd_opt(today.year(), 12, 31)?;
    Some((start, end))
}

/// Enumerate every bucket of a window, in chronological order.
fn build_axis(kind: RangeKind, start: NaiveDate, end: NaiveDate) -> Vec<BucketKey> {
    match kind {
        RangeKind::Today => (0..24)
            .map(|hour| BucketKey {
                label: format!("{hour:02}:00"),
                order: midnight(start) + Duration::hours(hour),
            })
            .collect(),
        RangeKind::Year => (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(start.year(), month, 1))
            .map(|first| BucketKey {
                label: first.format("%b").to_string(),
                order: midnight(first),
            })
            .collect(),
        RangeKind::Week | RangeKind::Month | RangeKind::Custom => start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|day| BucketKey {
                label: day_label(kind, day),
                order: midnight(day),
            })
            .collect(),
    }
}

fn day_label(kind: RangeKind, day: NaiveDate) -> String {
    match kind {
        RangeKind::Week => day.format("%a").to_string(),
        RangeKind::Month => day.day().to_string(),
        _ => day.format("%b %-d").to_string(),
    }
}
