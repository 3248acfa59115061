//! University of Guelph reading-break calendar.
//!
//! - Fall study break: Saturday before Thanksgiving (2nd Monday of October)
//!   through the Tuesday after.
//! - Winter reading week: Family Day (3rd Monday of February) through the
//!   Friday of that week.

use chrono::{Datelike, Days, NaiveDate, Weekday};

const THANKSGIVING_OCCURRENCE: u32 = 2;
const FALL_BREAK_DAYS_BEFORE: u64 = 2;
const FALL_BREAK_DAYS_AFTER: u64 = 1;

const FAMILY_DAY_OCCURRENCE: u32 = 3;
const WINTER_BREAK_DAYS_AFTER: u64 = 4;

/// First month (August) that belongs to the fall half of an academic year.
const ACADEMIC_YEAR_START_MONTH: u32 = 8;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BreakPeriod {
    /// Every day from `start` to `end`, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

/// ## Summary
/// Date of the `n`th `weekday` in a month (`n` counted from 1).
///
/// Closed form: offset from the 1st to the first matching weekday, then
/// whole weeks. `None` if that day does not exist in the month.
#[must_use]
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (weekday.num_days_from_sunday() + 7 - first.weekday().num_days_from_sunday()) % 7;
    let day = 1 + offset + n.checked_sub(1)? * 7;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Academic year a date belongs to, named by its fall calendar year.
#[must_use]
pub fn academic_fall_year(date: NaiveDate) -> i32 {
    if date.month() >= ACADEMIC_YEAR_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Computes the fixed institutional break windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreakCalculator;

impl BreakCalculator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// ## Summary
    /// Fall and winter breaks of the academic year starting in `fall_year`,
    /// in that order.
    #[must_use]
    pub fn reading_breaks(&self, fall_year: i32) -> Vec<BreakPeriod> {
        [Self::fall_break(fall_year), Self::winter_break(fall_year + 1)]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Breaks of `fall_year` followed by those of the next academic year.
    #[must_use]
    pub fn breaks_from(&self, fall_year: i32) -> Vec<BreakPeriod> {
        let mut breaks = self.reading_breaks(fall_year);
        breaks.extend(self.reading_breaks(fall_year + 1));
        breaks
    }

    fn fall_break(year: i32) -> Option<BreakPeriod> {
        let thanksgiving = nth_weekday_of_month(year, 10, Weekday::Mon, THANKSGIVING_OCCURRENCE)?;
        Some(BreakPeriod {
            start: thanksgiving.checked_sub_days(Days::new(FALL_BREAK_DAYS_BEFORE))?,
            end: thanksgiving.checked_add_days(Days::new(FALL_BREAK_DAYS_AFTER))?,
        })
    }

    fn winter_break(year: i32) -> Option<BreakPeriod> {
        let family_day = nth_weekday_of_month(year, 2, Weekday::Mon, FAMILY_DAY_OCCURRENCE)?;
        Some(BreakPeriod {
            start: family_day,
            end: family_day.checked_add_days(Days::new(WINTER_BREAK_DAYS_AFTER))?,
        })
    }
}
