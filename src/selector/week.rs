use std::fmt;
use std::iter::successors;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Duration, Weekday};

const DAYS_IN_WEEK: u8 = 7;

/// The day of the week on which each week begins
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekStart(Weekday);

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(Weekday::Sunday);
    pub const MONDAY: WeekStart = WeekStart(Weekday::Monday);

    pub fn new(weekday: Weekday) -> WeekStart {
        WeekStart(weekday)
    }

    pub fn weekday(self) -> Weekday {
        self.0
    }

    /// Number of days between the start of the week containing `date` and
    /// `date` itself
    fn offset_of(self, date: Date) -> u8 {
        (date.weekday().number_days_from_sunday() + DAYS_IN_WEEK
            - self.0.number_days_from_sunday())
            % DAYS_IN_WEEK
    }
}

impl Default for WeekStart {
    fn default() -> WeekStart {
        WeekStart::MONDAY
    }
}

impl From<Weekday> for WeekStart {
    fn from(weekday: Weekday) -> WeekStart {
        WeekStart(weekday)
    }
}

/// Converts a day number in which 0 is Sunday and 6 is Saturday
impl TryFrom<u8> for WeekStart {
    type Error = WeekStartError;

    fn try_from(value: u8) -> Result<WeekStart, WeekStartError> {
        let weekday = match value {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            n => return Err(WeekStartError::OutOfRange(n)),
        };
        Ok(WeekStart(weekday))
    }
}

/// Accepts either a day number (0 = Sunday) or an English weekday name,
/// full or abbreviated to three letters, in any case
impl FromStr for WeekStart {
    type Err = WeekStartError;

    fn from_str(s: &str) -> Result<WeekStart, WeekStartError> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return WeekStart::try_from(n);
        }
        let weekday = match s.to_ascii_lowercase().as_str() {
            "sun" | "sunday" => Weekday::Sunday,
            "mon" | "monday" => Weekday::Monday,
            "tue" | "tuesday" => Weekday::Tuesday,
            "wed" | "wednesday" => Weekday::Wednesday,
            "thu" | "thursday" => Weekday::Thursday,
            "fri" | "friday" => Weekday::Friday,
            "sat" | "saturday" => Weekday::Saturday,
            _ => return Err(WeekStartError::Unknown(s.to_owned())),
        };
        Ok(WeekStart(weekday))
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum WeekStartError {
    #[error("week start must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    OutOfRange(u8),
    #[error("unrecognized weekday {0:?}")]
    Unknown(String),
}

/// The seven consecutive days making up one week
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekWindow {
    first: Date,
    last: Date,
}

impl WeekWindow {
    /// Returns the week that begins on `start` and contains `date`.
    ///
    /// Fails if part of that week lies outside the range of representable
    /// dates.
    pub fn containing(date: Date, start: WeekStart) -> Result<WeekWindow, OutOfTimeError> {
        let first = date
            .checked_sub(Duration::days(start.offset_of(date).into()))
            .ok_or(OutOfTimeError)?;
        let last = first
            .checked_add(Duration::days(i64::from(DAYS_IN_WEEK) - 1))
            .ok_or(OutOfTimeError)?;
        Ok(WeekWindow { first, last })
    }

    pub fn first(self) -> Date {
        self.first
    }

    pub fn last(self) -> Date {
        self.last
    }

    pub fn contains(self, date: Date) -> bool {
        self.first <= date && date <= self.last
    }

    pub fn days(self) -> impl Iterator<Item = Date> {
        successors(Some(self.first), move |&d| {
            d.next_day().filter(|&next| next <= self.last)
        })
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.last)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
