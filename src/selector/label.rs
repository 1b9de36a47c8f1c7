use super::week::{OutOfTimeError, WeekStart, WeekWindow};
use thiserror::Error;
use time::{
    format_description::{self, FormatItem, OwnedFormatItem},
    macros::{date, format_description},
    Date,
};

/// Two-digit day of the month
static DEFAULT_DAY_FMT: &[FormatItem<'_>] = format_description!("[day]");

/// Full month name
static DEFAULT_MONTH_FMT: &[FormatItem<'_>] = format_description!("[month repr:long]");

/// Date used to check that a format description can be applied to a bare
/// calendar date
const PROBE_DATE: Date = date!(2000 - 01 - 01);

/// How to render the label for a week, e.g., "29 March - 04 April".
///
/// The label consists of the first and last days of the week, each formatted
/// with the day pattern, followed by the last day's month formatted with the
/// month pattern.  If the first day's month formats differently from the last
/// day's, it is inserted after the first day as well.
///
/// Patterns use the [`time` format description
/// syntax](https://time-rs.github.io/book/api/format-description.html).
#[derive(Clone, Debug)]
pub struct LabelFormat {
    day: OwnedFormatItem,
    month: OwnedFormatItem,
}

impl LabelFormat {
    pub fn new(day: &str, month: &str) -> Result<LabelFormat, LabelError> {
        LabelFormat::default()
            .with_day_format(day)?
            .with_month_format(month)
    }

    pub fn with_day_format(mut self, pattern: &str) -> Result<LabelFormat, LabelError> {
        self.day = parse_pattern(pattern)?;
        Ok(self)
    }

    pub fn with_month_format(mut self, pattern: &str) -> Result<LabelFormat, LabelError> {
        self.month = parse_pattern(pattern)?;
        Ok(self)
    }

    /// Render the label for the week beginning on `week_start` that contains
    /// `anchor`
    pub fn label(&self, anchor: Date, week_start: WeekStart) -> Result<String, LabelError> {
        self.week_label(WeekWindow::containing(anchor, week_start)?)
    }

    pub fn week_label(&self, week: WeekWindow) -> Result<String, LabelError> {
        let first_day = week.first().format(&self.day)?;
        let first_month = week.first().format(&self.month)?;
        let last_day = week.last().format(&self.day)?;
        let last_month = week.last().format(&self.month)?;
        if first_month == last_month {
            Ok(format!("{first_day} - {last_day} {last_month}"))
        } else {
            Ok(format!("{first_day} {first_month} - {last_day} {last_month}"))
        }
    }
}

impl Default for LabelFormat {
    fn default() -> LabelFormat {
        LabelFormat {
            day: OwnedFormatItem::from(DEFAULT_DAY_FMT),
            month: OwnedFormatItem::from(DEFAULT_MONTH_FMT),
        }
    }
}

fn parse_pattern(pattern: &str) -> Result<OwnedFormatItem, LabelError> {
    let item = format_description::parse_owned::<1>(pattern)?;
    // Patterns that ask for a time of day or an offset only fail once they're
    // applied to a date, so try one now instead of on every render.
    PROBE_DATE.format(&item)?;
    Ok(item)
}

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("invalid format description")]
    Pattern(#[from] time::error::InvalidFormatDescription),
    #[error("format description cannot be applied to a calendar date")]
    Format(#[from] time::error::Format),
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_month() {
        let fmt = LabelFormat::default();
        assert_eq!(
            fmt.label(date!(2021 - 03 - 15), WeekStart::MONDAY).unwrap(),
            "15 - 21 March"
        );
    }

    #[test]
    fn test_across_months() {
        let fmt = LabelFormat::default();
        assert_eq!(
            fmt.label(date!(2021 - 03 - 30), WeekStart::MONDAY).unwrap(),
            "29 March - 04 April"
        );
    }

    #[test]
    fn test_unpadded_day() {
        let fmt = LabelFormat::new("[day padding:none]", "[month repr:long]").unwrap();
        assert_eq!(
            fmt.label(date!(2021 - 03 - 30), WeekStart::MONDAY).unwrap(),
            "29 March - 4 April"
        );
    }

    #[test]
    fn test_short_month() {
        let fmt = LabelFormat::default()
            .with_month_format("[month repr:short]")
            .unwrap();
        assert_eq!(
            fmt.label(date!(2021 - 03 - 30), WeekStart::MONDAY).unwrap(),
            "29 Mar - 04 Apr"
        );
    }

    #[test]
    fn test_across_years() {
        let fmt = LabelFormat::default();
        assert_eq!(
            fmt.label(date!(2021 - 01 - 01), WeekStart::SUNDAY).unwrap(),
            "27 December - 02 January"
        );
    }

    #[test]
    fn test_week_start_changes_label() {
        let fmt = LabelFormat::default();
        assert_eq!(
            fmt.label(date!(2021 - 03 - 15), WeekStart::SUNDAY).unwrap(),
            "14 - 20 March"
        );
    }

    #[test]
    fn test_month_compared_by_formatted_text() {
        // A numeric month pattern still differs across a month boundary
        let fmt = LabelFormat::default()
            .with_month_format("/[month]")
            .unwrap();
        assert_eq!(
            fmt.label(date!(2021 - 03 - 30), WeekStart::MONDAY).unwrap(),
            "29 /03 - 04 /04"
        );
        // ... while a pattern without the month never does
        let fmt = LabelFormat::default().with_month_format("[year]").unwrap();
        assert_eq!(
            fmt.label(date!(2021 - 03 - 30), WeekStart::MONDAY).unwrap(),
            "29 - 04 2021"
        );
    }

    #[test]
    fn test_idempotent() {
        let fmt = LabelFormat::default();
        let first = fmt.label(date!(2024 - 02 - 29), WeekStart::MONDAY).unwrap();
        let second = fmt.label(date!(2024 - 02 - 29), WeekStart::MONDAY).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "26 February - 03 March");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            LabelFormat::new("[bogus]", "[month]"),
            Err(LabelError::Pattern(_))
        ));
    }

    #[test]
    fn test_time_pattern_rejected() {
        assert!(matches!(
            LabelFormat::default().with_day_format("[hour]"),
            Err(LabelError::Format(_))
        ));
    }

    #[test]
    fn test_out_of_time() {
        let fmt = LabelFormat::default();
        assert!(matches!(
            fmt.label(Date::MAX, WeekStart::MONDAY),
            Err(LabelError::OutOfTime(OutOfTimeError))
        ));
    }
}
