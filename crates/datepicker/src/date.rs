//! Calendar dates and the arithmetic the picker grids are built from.
//!
//! All functions here are total: results that would leave the range chrono can
//! represent saturate at [`CalendarDate::MIN`] / [`CalendarDate::MAX`].

use std::{fmt, str::FromStr};

use chrono::{Datelike as _, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::DateError;

/// A date on the proleptic Gregorian calendar, without time-of-day.
///
/// Converting from a [`NaiveDateTime`] drops the time, so all comparisons
/// between `CalendarDate`s are calendar-date comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// The earliest representable date.
    pub const MIN: Self = Self(NaiveDate::MIN);

    /// The latest representable date.
    pub const MAX: Self = Self(NaiveDate::MAX);

    /// `month` and `day` are 1-based.
    ///
    /// # Errors
    /// If the components do not name a real day, e.g. February 30th.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 1-12
    #[inline]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// 1-31
    #[inline]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    #[inline]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    #[inline]
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// The first day of this date's month.
    pub fn first_of_month(self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }
}

impl From<NaiveDate> for CalendarDate {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<NaiveDateTime> for CalendarDate {
    #[inline]
    fn from(date_time: NaiveDateTime) -> Self {
        Self(date_time.date())
    }
}

impl From<CalendarDate> for NaiveDate {
    #[inline]
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NaiveDate>()
            .map(Self)
            .map_err(|_err| DateError::Parse(s.to_owned()))
    }
}

// ----------------------------------------------------------------------------

/// The first column of the day grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Sunday = 0, Saturday = 6.
    #[inline]
    pub fn num_days_from_sunday(self) -> u32 {
        self as u32
    }

    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
        }
    }

    /// The seven weekdays of a grid row, starting with `self`.
    pub fn week(self) -> impl Iterator<Item = Weekday> {
        std::iter::successors(Some(self.weekday()), |day| Some(day.succ())).take(7)
    }
}

impl From<Weekday> for WeekStart {
    fn from(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }
}

/// What month and year arithmetic does with a day-of-month the target month lacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum OverflowPolicy {
    /// Carry the surplus days into the following month: Jan 31 + 1 month = Mar 2 (or Mar 3).
    #[default]
    Rollover,

    /// Stop at the last day of the target month: Jan 31 + 1 month = Feb 28 (or Feb 29).
    Clamp,
}

// ----------------------------------------------------------------------------

fn saturate(forward: bool) -> CalendarDate {
    if forward {
        CalendarDate::MAX
    } else {
        CalendarDate::MIN
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn add_days(date: CalendarDate, days: i64) -> CalendarDate {
    let shifted = if days < 0 {
        date.0.checked_sub_days(Days::new(days.unsigned_abs()))
    } else {
        date.0.checked_add_days(Days::new(days.unsigned_abs()))
    };
    shifted.map_or_else(|| saturate(days >= 0), CalendarDate)
}

/// [`add_months_with`] using [`OverflowPolicy::Rollover`].
pub fn add_months(date: CalendarDate, months: i32) -> CalendarDate {
    add_months_with(date, months, OverflowPolicy::Rollover)
}

pub fn add_months_with(date: CalendarDate, months: i32, policy: OverflowPolicy) -> CalendarDate {
    shift_months(date, i64::from(months), policy)
}

/// [`add_years_with`] using [`OverflowPolicy::Rollover`], so Feb 29 + 1 year = Mar 1.
pub fn add_years(date: CalendarDate, years: i32) -> CalendarDate {
    add_years_with(date, years, OverflowPolicy::Rollover)
}

pub fn add_years_with(date: CalendarDate, years: i32, policy: OverflowPolicy) -> CalendarDate {
    shift_months(date, i64::from(years) * 12, policy)
}

fn shift_months(date: CalendarDate, months: i64, policy: OverflowPolicy) -> CalendarDate {
    let total = i64::from(date.year()) * 12 + i64::from(date.0.month0()) + months;
    let target = i32::try_from(total.div_euclid(12)).ok().and_then(|year| {
        let month = total.rem_euclid(12) as u32 + 1;
        let day = date.day();
        match policy {
            OverflowPolicy::Rollover => NaiveDate::from_ymd_opt(year, month, 1)?
                .checked_add_days(Days::new(u64::from(day - 1))),
            OverflowPolicy::Clamp => {
                NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
            }
        }
    });
    target.map_or_else(|| saturate(months >= 0), CalendarDate)
}

/// Same year, month and day.
#[inline]
pub fn is_date_equal(a: CalendarDate, b: CalendarDate) -> bool {
    a == b
}

/// `min <= date <= max`, checking only the bounds that are set.
pub fn is_date_in_range(
    date: CalendarDate,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> bool {
    min.is_none_or(|min| min <= date) && max.is_none_or(|max| date <= max)
}

/// `date` if it is in range, otherwise the bound it crossed.
///
/// With `min > max` a date below `min` is moved to `min`, which is then above `max`.
pub fn clamp_into_range(
    date: CalendarDate,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> CalendarDate {
    match (min, max) {
        (Some(min), _) if date < min => min,
        (_, Some(max)) if date > max => max,
        _ => date,
    }
}

/// The first cell of the 42-day grid: the first of `date`'s month, walked
/// back to the closest `week_start`.
pub fn first_display_day_of_month(date: CalendarDate, week_start: WeekStart) -> CalendarDate {
    let first = date.first_of_month();
    let back = (i64::from(first.weekday().num_days_from_sunday())
        - i64::from(week_start.num_days_from_sunday()))
    .rem_euclid(7);
    add_days(first, -back)
}

/// Floor `year` to a multiple of `years`: 2024 → 2020 for decades, 2000 for centuries.
#[inline]
pub fn period_start(year: i32, years: i32) -> i32 {
    year.div_euclid(years) * years
}

/// Whether `date` falls in the ten years starting at `start_year`.
#[inline]
pub fn is_date_in_decade(date: CalendarDate, start_year: i32) -> bool {
    (start_year..=start_year + 9).contains(&date.year())
}

/// `date` moved to `year`, keeping month and day per `policy`.
pub fn with_year(date: CalendarDate, year: i32, policy: OverflowPolicy) -> CalendarDate {
    add_years_with(date, year.saturating_sub(date.year()), policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn invalid_components_are_rejected() {
        assert_eq!(
            CalendarDate::from_ymd(2023, 2, 29),
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(CalendarDate::from_ymd(2024, 2, 29).is_ok());
        assert!("2024-13-01".parse::<CalendarDate>().is_err());
        assert_eq!("2024-01-05".parse::<CalendarDate>(), Ok(ymd(2024, 1, 5)));
    }

    #[test]
    fn time_of_day_is_ignored() {
        let morning = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap();
        let evening = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert!(is_date_equal(morning.into(), evening.into()));
        assert!(is_date_equal(ymd(2024, 5, 1), ymd(2024, 5, 1)));
    }

    #[test]
    fn month_overflow_rolls_over_by_default() {
        assert_eq!(add_months(ymd(2023, 1, 31), 1), ymd(2023, 3, 3));
        assert_eq!(add_months(ymd(2024, 1, 31), 1), ymd(2024, 3, 2));
        assert_eq!(add_years(ymd(2024, 2, 29), 1), ymd(2025, 3, 1));
        assert_eq!(add_months(ymd(2024, 3, 31), -1), ymd(2024, 3, 2));
    }

    #[test]
    fn month_overflow_can_clamp() {
        let policy = OverflowPolicy::Clamp;
        assert_eq!(add_months_with(ymd(2023, 1, 31), 1, policy), ymd(2023, 2, 28));
        assert_eq!(add_months_with(ymd(2024, 1, 31), 1, policy), ymd(2024, 2, 29));
        assert_eq!(add_years_with(ymd(2024, 2, 29), 1, policy), ymd(2025, 2, 28));
    }

    #[test]
    fn months_cross_year_boundaries() {
        assert_eq!(add_months(ymd(2024, 11, 15), 3), ymd(2025, 2, 15));
        assert_eq!(add_months(ymd(2024, 2, 15), -3), ymd(2023, 11, 15));
        assert_eq!(add_months(ymd(2024, 1, 15), -25), ymd(2021, 12, 15));
        assert_eq!(add_days(ymd(2024, 2, 28), 2), ymd(2024, 3, 1));
        assert_eq!(add_days(ymd(2024, 3, 1), -1), ymd(2024, 2, 29));
    }

    #[test]
    fn month_round_trip() {
        for date in [ymd(2024, 1, 15), ymd(2023, 10, 28), ymd(1999, 12, 1)] {
            assert_eq!(add_months(add_months(date, 3), -3), date);
        }
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(add_years(CalendarDate::MAX, 1), CalendarDate::MAX);
        assert_eq!(add_days(CalendarDate::MIN, -1), CalendarDate::MIN);
        assert_eq!(add_months(ymd(2024, 1, 1), i32::MAX), CalendarDate::MAX);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let (min, max) = (ymd(2024, 1, 10), ymd(2024, 1, 20));
        assert!(is_date_in_range(min, Some(min), Some(max)));
        assert!(is_date_in_range(max, Some(min), Some(max)));
        assert!(!is_date_in_range(ymd(2024, 1, 9), Some(min), Some(max)));
        assert!(!is_date_in_range(ymd(2024, 1, 21), Some(min), Some(max)));
        assert!(is_date_in_range(ymd(1900, 1, 1), None, Some(max)));
        assert!(is_date_in_range(ymd(2900, 1, 1), Some(min), None));
        assert!(is_date_in_range(ymd(2900, 1, 1), None, None));
    }

    #[test]
    fn clamping_is_idempotent() {
        let (min, max) = (Some(ymd(2024, 1, 10)), Some(ymd(2024, 1, 20)));
        for date in [ymd(2024, 1, 5), ymd(2024, 1, 15), ymd(2024, 2, 1)] {
            let once = clamp_into_range(date, min, max);
            assert_eq!(clamp_into_range(once, min, max), once);
            assert!(is_date_in_range(once, min, max));
        }
        assert_eq!(clamp_into_range(ymd(2024, 1, 5), min, max), ymd(2024, 1, 10));
        assert_eq!(clamp_into_range(ymd(2024, 2, 1), min, max), ymd(2024, 1, 20));
        assert_eq!(clamp_into_range(ymd(2024, 2, 1), None, None), ymd(2024, 2, 1));
    }

    #[test]
    fn first_display_day_walks_back_to_week_start() {
        // March 1st 2024 is a Friday.
        assert_eq!(
            first_display_day_of_month(ymd(2024, 3, 14), WeekStart::Sunday),
            ymd(2024, 2, 25)
        );
        assert_eq!(
            first_display_day_of_month(ymd(2024, 3, 31), WeekStart::Monday),
            ymd(2024, 2, 26)
        );
        assert_eq!(
            first_display_day_of_month(ymd(2024, 3, 1), WeekStart::Friday),
            ymd(2024, 3, 1)
        );
        assert_eq!(
            first_display_day_of_month(ymd(2024, 3, 1), WeekStart::Saturday),
            ymd(2024, 2, 24)
        );
    }

    #[test]
    fn periods_floor_towards_negative_infinity() {
        assert_eq!(period_start(2024, 10), 2020);
        assert_eq!(period_start(2024, 100), 2000);
        assert_eq!(period_start(2000, 100), 2000);
        assert_eq!(period_start(-5, 10), -10);
        assert!(is_date_in_decade(ymd(2029, 12, 31), 2020));
        assert!(!is_date_in_decade(ymd(2030, 1, 1), 2020));
    }

    #[test]
    fn week_starts_at_configured_day() {
        let week: Vec<Weekday> = WeekStart::Saturday.week().collect();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], Weekday::Sat);
        assert_eq!(week[1], Weekday::Sun);
        assert_eq!(week[6], Weekday::Fri);
        assert_eq!(WeekStart::from(Weekday::Wed), WeekStart::Wednesday);
    }

    #[test]
    fn days_in_month_knows_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 13), 0);
    }
}
