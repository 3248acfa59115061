//! iCalendar RRULE value type (RFC 5545 §3.3.10), weekly form only.

use std::fmt;

use super::DateTime;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Day number with Sunday as 0 and Saturday as 6.
    #[must_use]
    pub const fn number_from_sunday(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// Converts to the chrono weekday.
    #[must_use]
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
        }
    }

    /// Converts from the chrono weekday.
    #[must_use]
    pub const fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekly recurrence rule with an inclusive end bound.
///
/// Written as `FREQ=WEEKLY;BYDAY=<codes>;UNTIL=<date-time>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRule {
    /// Weekdays the series repeats on, in first-seen order.
    pub by_day: Vec<Weekday>,
    /// Last instant an occurrence may start at.
    pub until: DateTime,
}

impl WeeklyRule {
    #[must_use]
    pub fn new(by_day: Vec<Weekday>, until: DateTime) -> Self {
        Self { by_day, until }
    }

    /// Returns the comma-joined BYDAY list.
    #[must_use]
    pub fn by_day_list(&self) -> String {
        self.by_day
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for WeeklyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FREQ=WEEKLY;BYDAY={};UNTIL={}",
            self.by_day_list(),
            self.until
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_chrono_conversions() {
        for day in [
            Weekday::Sunday,
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
        ] {
            assert_eq!(Weekday::from_chrono(day.to_chrono()), day);
        }
        assert_eq!(Weekday::Thursday.to_string(), "TH");
    }

    #[test]
    fn weekday_numbers_start_on_sunday() {
        assert_eq!(Weekday::Sunday.number_from_sunday(), 0);
        assert_eq!(Weekday::Friday.number_from_sunday(), 5);
        assert_eq!(
            u32::from(Weekday::Thursday.number_from_sunday()),
            chrono::Weekday::Thu.num_days_from_sunday()
        );
    }

    #[test]
    fn weekly_rule_display() {
        let rule = WeeklyRule::new(
            vec![Weekday::Tuesday, Weekday::Thursday],
            DateTime::floating(2025, 11, 28, 23, 59, 59),
        );
        assert_eq!(
            rule.to_string(),
            "FREQ=WEEKLY;BYDAY=TU,TH;UNTIL=20251128T235959"
        );
    }
}
