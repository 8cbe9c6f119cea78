//! Immutable UTC calendar values.
//!
//! [`DateValue`] is the leaf abstraction the grid and time-slot builders are
//! written against: a UTC timestamp with second precision, field-level
//! "set and renormalize" mutation that always returns a new value, and
//! day-granularity comparison helpers. The immutable strategy is deliberate —
//! every operation returns a fresh value, so a half-built grid can never
//! observe a timestamp that changed under it.
//!
//! Field normalization follows ordinary calendar arithmetic: month 0 is
//! December of the previous year, month 13 is January of the next, day 0 is
//! the last day of the previous month, and oversized fields keep rolling
//! forward. Months are normalized through a linear month index
//! (`year * 12 + month - 1`) so year boundaries never need special casing.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;

use crate::error::{PickerError, Result};
use crate::pattern;

/// Linear month index: months since 1 CE January, valid for any raw month
/// number (0, 13, -5, ...). Two (year, month) pairs compare correctly across
/// year boundaries through this index where raw month numbers do not.
pub(crate) fn linear_month_index(year: i32, month: i32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

/// A partial set of calendar fields for [`DateValue::set`].
///
/// Fields left `None` are inherited from the receiver. Values are signed so
/// callers can express relative positions ("day 0" = last day of the previous
/// month) and let normalization resolve them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
}

/// An immutable UTC calendar timestamp with second precision.
///
/// Ordering (`Ord`) compares at full timestamp precision; use
/// [`DateValue::same_day`] for day-granularity equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DateValue(DateTime<Utc>);

impl DateValue {
    /// The current instant in UTC, truncated to whole seconds.
    ///
    /// Builders never call this themselves — the caller samples "now" once
    /// per grid or panel build and passes it in, so every cell in one build
    /// is classified against the same reference instant.
    pub fn now_utc() -> DateValue {
        let now = Utc::now();
        DateValue(now.with_nanosecond(0).unwrap_or(now))
    }

    /// Construct from calendar fields, normalizing out-of-range values.
    ///
    /// # Arguments
    ///
    /// All fields are signed: `month = 0` resolves to December of `year - 1`,
    /// `month = 13` to January of `year + 1`, `day = 0` to the last day of
    /// the previous month, and overflowing time-of-day fields roll into
    /// adjacent days.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDate`] only when the normalized result
    /// falls outside the representable date range.
    pub fn from_fields(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<DateValue> {
        let linear = linear_month_index(year, month);
        let norm_year = i32::try_from(linear.div_euclid(12)).map_err(|_| {
            PickerError::InvalidDate(format!("year out of range after normalizing month {month}"))
        })?;
        let norm_month = linear.rem_euclid(12) as u32 + 1;

        let first = NaiveDate::from_ymd_opt(norm_year, norm_month, 1).ok_or_else(|| {
            PickerError::InvalidDate(format!("{norm_year:04}-{norm_month:02} is not representable"))
        })?;
        let date = first
            .checked_add_signed(Duration::days(i64::from(day) - 1))
            .ok_or_else(|| {
                PickerError::InvalidDate(format!("day offset {day} leaves the date range"))
            })?;

        let tod_seconds =
            i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second);
        let midnight = date.and_time(chrono::NaiveTime::MIN);
        let naive = midnight
            .checked_add_signed(Duration::seconds(tod_seconds))
            .ok_or_else(|| {
                PickerError::InvalidDate(format!(
                    "time offset {tod_seconds}s leaves the date range"
                ))
            })?;
        Ok(DateValue(naive.and_utc()))
    }

    /// Construct a midnight value from year/month/day, normalizing like
    /// [`DateValue::from_fields`].
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDate`] when the normalized result is
    /// not representable.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Result<DateValue> {
        DateValue::from_fields(year, month, day, 0, 0, 0)
    }

    /// Return a new value with the patched fields overridden and the whole
    /// timestamp renormalized; unpatched fields are inherited.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDate`] when the normalized result is
    /// not representable.
    pub fn set(self, patch: FieldPatch) -> Result<DateValue> {
        DateValue::from_fields(
            patch.year.unwrap_or_else(|| self.year()),
            patch.month.unwrap_or(self.month() as i32),
            patch.day.unwrap_or(self.day() as i32),
            patch.hour.unwrap_or(self.hour() as i32),
            patch.minute.unwrap_or(self.minute() as i32),
            patch.second.unwrap_or(self.second() as i32),
        )
    }

    /// Add `n` calendar months (negative `n` subtracts), keeping the day
    /// number and renormalizing.
    ///
    /// When the target month is shorter than the current day number the
    /// overflow cascades into the following month: Jan 31 plus one month is
    /// Mar 3 in a common year. Callers that want "same day, clamped" must
    /// pin the day to a safe value (e.g. 1) before adding.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDate`] when the result is not
    /// representable.
    pub fn plus_months(self, n: i32) -> Result<DateValue> {
        self.set(FieldPatch {
            month: Some(self.month() as i32 + n),
            ..FieldPatch::default()
        })
    }

    /// ISO weekday number: 1 = Monday .. 7 = Sunday.
    pub fn weekday(self) -> u8 {
        self.0.weekday().number_from_monday() as u8
    }

    /// True when both values fall on the same UTC calendar day.
    pub fn same_day(self, other: DateValue) -> bool {
        self.0.date_naive() == other.0.date_naive()
    }

    /// This value truncated to midnight.
    pub fn start_of_day(self) -> DateValue {
        DateValue(self.0 - Duration::seconds(i64::from(self.0.num_seconds_from_midnight())))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1..=12.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-based.
    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub fn second(self) -> u32 {
        self.0.second()
    }

    /// Render this value through a token pattern (see [`crate::pattern`]).
    pub fn format(self, pat: &str) -> String {
        pattern::format(self, pat)
    }

    /// Parse `text` against a token pattern. Returns `None` on any mismatch
    /// or out-of-range field — never an error.
    pub fn parse(text: &str, pat: &str) -> Option<DateValue> {
        pattern::parse(text, pat)
    }
}

/// Number of days in the given month, or `None` when `month` is not 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    // Day 0 of the following month normalizes to the last day of this one.
    DateValue::from_ymd(year, month as i32 + 1, 0)
        .ok()
        .map(DateValue::day)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalization ───────────────────────────────────────────────────

    #[test]
    fn test_month_zero_is_december_of_previous_year() {
        let v = DateValue::from_ymd(2024, 0, 15).unwrap();
        assert_eq!((v.year(), v.month(), v.day()), (2023, 12, 15));
    }

    #[test]
    fn test_month_thirteen_is_january_of_next_year() {
        let v = DateValue::from_ymd(2024, 13, 15).unwrap();
        assert_eq!((v.year(), v.month(), v.day()), (2025, 1, 15));
    }

    #[test]
    fn test_day_zero_is_last_day_of_previous_month() {
        let v = DateValue::from_ymd(2024, 3, 0).unwrap();
        assert_eq!((v.year(), v.month(), v.day()), (2024, 2, 29)); // leap year

        let v = DateValue::from_ymd(2023, 3, 0).unwrap();
        assert_eq!((v.year(), v.month(), v.day()), (2023, 2, 28));
    }

    #[test]
    fn test_day_overflow_rolls_forward() {
        let v = DateValue::from_ymd(2024, 1, 32).unwrap();
        assert_eq!((v.year(), v.month(), v.day()), (2024, 2, 1));
    }

    #[test]
    fn test_negative_day_reaches_back_through_months() {
        // Day -5 of March = six days before March 1 = Feb 24 (leap year).
        let v = DateValue::from_ymd(2024, 3, -5).unwrap();
        assert_eq!((v.year(), v.month(), v.day()), (2024, 2, 24));
    }

    #[test]
    fn test_time_of_day_overflow_rolls_into_next_day() {
        let v = DateValue::from_fields(2024, 1, 31, 25, 0, 0).unwrap();
        assert_eq!((v.month(), v.day(), v.hour()), (2, 1, 1));
    }

    // ── plus_months ─────────────────────────────────────────────────────

    #[test]
    fn test_plus_months_simple() {
        let v = DateValue::from_ymd(2024, 5, 15).unwrap();
        let w = v.plus_months(3).unwrap();
        assert_eq!((w.year(), w.month(), w.day()), (2024, 8, 15));
    }

    #[test]
    fn test_plus_months_crosses_year_boundary() {
        let v = DateValue::from_ymd(2024, 11, 10).unwrap();
        let w = v.plus_months(3).unwrap();
        assert_eq!((w.year(), w.month(), w.day()), (2025, 2, 10));

        let back = w.plus_months(-3).unwrap();
        assert_eq!((back.year(), back.month(), back.day()), (2024, 11, 10));
    }

    #[test]
    fn test_plus_months_overflow_cascades_not_clamps() {
        // The documented trap: Jan 31 + 1 month lands in March, not Feb 28/29.
        let common = DateValue::from_ymd(2023, 1, 31).unwrap();
        let w = common.plus_months(1).unwrap();
        assert_eq!((w.year(), w.month(), w.day()), (2023, 3, 3));

        let leap = DateValue::from_ymd(2024, 1, 31).unwrap();
        let w = leap.plus_months(1).unwrap();
        assert_eq!((w.year(), w.month(), w.day()), (2024, 3, 2));
    }

    #[test]
    fn test_plus_months_with_day_pinned_is_safe() {
        let v = DateValue::from_ymd(2024, 1, 31).unwrap();
        let pinned = v
            .set(FieldPatch {
                day: Some(1),
                ..FieldPatch::default()
            })
            .unwrap();
        // Last day of the next month via day 0 of the month after it.
        let last = pinned.plus_months(2).unwrap().set(FieldPatch {
            day: Some(0),
            ..FieldPatch::default()
        });
        let last = last.unwrap();
        assert_eq!((last.year(), last.month(), last.day()), (2024, 2, 29));
    }

    // ── set / accessors ─────────────────────────────────────────────────

    #[test]
    fn test_set_inherits_unpatched_fields() {
        let v = DateValue::from_fields(2024, 6, 15, 10, 30, 45).unwrap();
        let w = v
            .set(FieldPatch {
                hour: Some(0),
                minute: Some(0),
                second: Some(0),
                ..FieldPatch::default()
            })
            .unwrap();
        assert_eq!((w.year(), w.month(), w.day()), (2024, 6, 15));
        assert_eq!((w.hour(), w.minute(), w.second()), (0, 0, 0));
    }

    #[test]
    fn test_weekday_iso_numbering() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday.
        assert_eq!(DateValue::from_ymd(2024, 1, 1).unwrap().weekday(), 1);
        assert_eq!(DateValue::from_ymd(2024, 1, 7).unwrap().weekday(), 7);
        assert_eq!(DateValue::from_ymd(2024, 2, 1).unwrap().weekday(), 4); // Thursday
    }

    #[test]
    fn test_same_day_ignores_time_of_day() {
        let a = DateValue::from_fields(2024, 6, 15, 0, 0, 1).unwrap();
        let b = DateValue::from_fields(2024, 6, 15, 23, 59, 59).unwrap();
        assert!(a.same_day(b));
        assert!(!a.same_day(DateValue::from_ymd(2024, 6, 16).unwrap()));
    }

    #[test]
    fn test_ordering_is_full_precision() {
        let a = DateValue::from_fields(2024, 6, 15, 10, 0, 0).unwrap();
        let b = DateValue::from_fields(2024, 6, 15, 10, 0, 1).unwrap();
        assert!(a < b);
        assert_eq!(a.cmp(&a), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_start_of_day() {
        let v = DateValue::from_fields(2024, 6, 15, 18, 30, 9).unwrap();
        let sod = v.start_of_day();
        assert!(sod.same_day(v));
        assert_eq!((sod.hour(), sod.minute(), sod.second()), (0, 0, 0));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_linear_month_index_orders_across_years() {
        // December 2023 sorts before January 2024 even though 12 > 1.
        assert!(linear_month_index(2023, 12) < linear_month_index(2024, 1));
        // Raw month 0 of 2024 equals December 2023.
        assert_eq!(linear_month_index(2024, 0), linear_month_index(2023, 12));
        // Raw month 13 of 2023 equals January 2024.
        assert_eq!(linear_month_index(2023, 13), linear_month_index(2024, 1));
    }

    #[test]
    fn test_from_fields_rejects_unrepresentable_years() {
        assert!(DateValue::from_ymd(i32::MAX, 1, 1).is_err());
    }
}
