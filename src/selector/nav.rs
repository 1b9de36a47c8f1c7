use super::label::{LabelError, LabelFormat};
use super::week::{OutOfTimeError, WeekStart, WeekWindow};
use std::fmt;
use thiserror::Error;
use time::{Date, Duration};

/// Returns whether a control for moving to the previous week should be
/// offered when the anchor date is `current` and navigation is bounded below
/// by `range_start`.
///
/// The check compares against the anchor date itself, not against the first
/// day of its week.
pub fn can_go_previous(current: Date, range_start: Option<Date>) -> bool {
    range_start.is_none_or(|start| current > start)
}

/// Returns whether a control for moving to the next week should be offered
/// when the anchor date is `current` and navigation is bounded above by
/// `range_end`
pub fn can_go_next(current: Date, range_end: Option<Date>) -> bool {
    range_end.is_none_or(|end| current < end)
}

/// An inclusive range of dates outside of which navigation is not permitted.
/// Either end may be left open.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Whitelist {
    start: Option<Date>,
    end: Option<Date>,
}

impl Whitelist {
    pub const UNBOUNDED: Whitelist = Whitelist {
        start: None,
        end: None,
    };

    pub fn new(start: Option<Date>, end: Option<Date>) -> Result<Whitelist, WhitelistError> {
        match (start, end) {
            (Some(start), Some(end)) if end < start => Err(WhitelistError::Inverted { start, end }),
            _ => Ok(Whitelist { start, end }),
        }
    }

    pub fn between(start: Date, end: Date) -> Result<Whitelist, WhitelistError> {
        Whitelist::new(Some(start), Some(end))
    }

    pub fn start(&self) -> Option<Date> {
        self.start
    }

    pub fn end(&self) -> Option<Date> {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|start| start <= date) && self.end.is_none_or(|end| date <= end)
    }

    /// Returns the date in the whitelist closest to `date`
    pub fn clamp(&self, date: Date) -> Date {
        let date = self.start.map_or(date, |start| date.max(start));
        self.end.map_or(date, |end| date.min(end))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum WhitelistError {
    #[error("whitelist ends on {end} before it starts on {start}")]
    Inverted { start: Date, end: Date },
}

/// Receives notifications from a [`WeekPager`] as the selected week changes.
///
/// All methods are called after the new anchor date has been committed.
pub trait WeekObserver {
    /// Called whenever the anchor date moves, with the first day of the newly
    /// selected week
    fn week_changed(&mut self, _first_day: Date) {}

    /// Called when the previous-week control is activated, with the new anchor
    /// date, before [`WeekObserver::week_changed`]
    fn previous_pressed(&mut self, _anchor: Date) {}

    /// Called when the next-week control is activated, with the new anchor
    /// date, before [`WeekObserver::week_changed`]
    fn next_pressed(&mut self, _anchor: Date) {}
}

impl<T: WeekObserver + ?Sized> WeekObserver for &mut T {
    fn week_changed(&mut self, first_day: Date) {
        (**self).week_changed(first_day);
    }

    fn previous_pressed(&mut self, anchor: Date) {
        (**self).previous_pressed(anchor);
    }

    fn next_pressed(&mut self, anchor: Date) {
        (**self).next_pressed(anchor);
    }
}

/// Placeholder observer type for pagers that have no observer
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct NoObserver;

impl WeekObserver for NoObserver {}

/// Adapts a closure into a [`WeekObserver`] that only listens for week
/// changes
#[derive(Clone, Copy)]
pub struct OnWeekChanged<F>(pub F);

impl<F: FnMut(Date)> WeekObserver for OnWeekChanged<F> {
    fn week_changed(&mut self, first_day: Date) {
        (self.0)(first_day);
    }
}

impl<F> fmt::Debug for OnWeekChanged<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnWeekChanged(..)")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Step {
    Previous,
    Next,
}

/// The state of a week selector: which week is shown, and how far the user
/// may page away from it
#[derive(Clone, Debug)]
pub struct WeekPager<O = NoObserver> {
    today: Date,
    anchor: Date,
    week_start: WeekStart,
    whitelist: Whitelist,
    label_format: LabelFormat,
    observer: Option<O>,
}

impl WeekPager<NoObserver> {
    /// Create a pager anchored at `today` with a Monday week start, no
    /// whitelist, the default label format, and no observer
    pub fn new(today: Date) -> WeekPager<NoObserver> {
        WeekPager {
            today,
            anchor: today,
            week_start: WeekStart::default(),
            whitelist: Whitelist::UNBOUNDED,
            label_format: LabelFormat::default(),
            observer: None,
        }
    }
}

impl<O> WeekPager<O> {
    /// Anchor the pager at `date` instead of today.  The date is moved into
    /// the whitelist if it lies outside it.
    pub fn with_anchor(mut self, date: Date) -> Self {
        self.anchor = self.whitelist.clamp(date);
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Restrict navigation to `whitelist`, moving the current anchor date into
    /// it if necessary
    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self.anchor = whitelist.clamp(self.anchor);
        self
    }

    pub fn with_label_format(mut self, label_format: LabelFormat) -> Self {
        self.label_format = label_format;
        self
    }

    pub fn with_observer<P: WeekObserver>(self, observer: P) -> WeekPager<P> {
        WeekPager {
            today: self.today,
            anchor: self.anchor,
            week_start: self.week_start,
            whitelist: self.whitelist,
            label_format: self.label_format,
            observer: Some(observer),
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn whitelist(&self) -> Whitelist {
        self.whitelist
    }

    pub fn label_format(&self) -> &LabelFormat {
        &self.label_format
    }

    pub fn observer(&self) -> Option<&O> {
        self.observer.as_ref()
    }

    pub fn observer_mut(&mut self) -> Option<&mut O> {
        self.observer.as_mut()
    }

    pub fn week_window(&self) -> Result<WeekWindow, OutOfTimeError> {
        WeekWindow::containing(self.anchor, self.week_start)
    }

    /// The label for the currently selected week.  This is recomputed on
    /// every call.
    pub fn label(&self) -> Result<String, LabelError> {
        self.label_format.label(self.anchor, self.week_start)
    }

    pub fn can_go_previous(&self) -> bool {
        can_go_previous(self.anchor, self.whitelist.start())
    }

    pub fn can_go_next(&self) -> bool {
        can_go_next(self.anchor, self.whitelist.end())
    }
}

impl<O: WeekObserver> WeekPager<O> {
    /// Move the anchor date back exactly one week and return the first day of
    /// the new week.
    ///
    /// Fails without changing anything if the anchor date is already on or
    /// before the start of the whitelist.  A permitted step may carry the
    /// anchor past the start, after which no further backward step is
    /// allowed.
    pub fn go_previous(&mut self) -> Result<Date, NavigationError> {
        self.step(Step::Previous)
    }

    /// Move the anchor date forwards exactly one week and return the first day
    /// of the new week.
    ///
    /// Fails without changing anything if the anchor date is already on or
    /// after the end of the whitelist.
    pub fn go_next(&mut self) -> Result<Date, NavigationError> {
        self.step(Step::Next)
    }

    /// Set the anchor date to `date`, which must lie within the whitelist,
    /// and return the first day of its week
    pub fn jump_to(&mut self, date: Date) -> Result<Date, NavigationError> {
        if !self.whitelist.contains(date) {
            log::trace!("Refusing to jump to {date}: outside of whitelist");
            return Err(NavigationError::OutsideWhitelist(date));
        }
        let moved = date != self.anchor;
        let first_day = self.commit(date)?;
        if moved {
            if let Some(observer) = self.observer.as_mut() {
                observer.week_changed(first_day);
            }
        }
        Ok(first_day)
    }

    pub fn jump_to_today(&mut self) -> Result<Date, NavigationError> {
        self.jump_to(self.today)
    }

    fn step(&mut self, step: Step) -> Result<Date, NavigationError> {
        let anchor = match step {
            Step::Previous => {
                if !self.can_go_previous() {
                    log::trace!("Refusing to page back from {}: at start of whitelist", self.anchor);
                    return Err(NavigationError::AtLowerBound);
                }
                self.anchor.checked_sub(Duration::weeks(1))
            }
            Step::Next => {
                if !self.can_go_next() {
                    log::trace!("Refusing to page forwards from {}: at end of whitelist", self.anchor);
                    return Err(NavigationError::AtUpperBound);
                }
                self.anchor.checked_add(Duration::weeks(1))
            }
        }
        .ok_or(OutOfTimeError)?;
        let first_day = self.commit(anchor)?;
        if let Some(observer) = self.observer.as_mut() {
            match step {
                Step::Previous => observer.previous_pressed(anchor),
                Step::Next => observer.next_pressed(anchor),
            }
            observer.week_changed(first_day);
        }
        Ok(first_day)
    }

    // Only commits if the whole of the new week is representable
    fn commit(&mut self, anchor: Date) -> Result<Date, OutOfTimeError> {
        let first_day = WeekWindow::containing(anchor, self.week_start)?.first();
        log::debug!("Moving anchor date from {} to {anchor}", self.anchor);
        self.anchor = anchor;
        Ok(first_day)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum NavigationError {
    #[error("already at the start of the whitelist")]
    AtLowerBound,
    #[error("already at the end of the whitelist")]
    AtUpperBound,
    #[error("{0} is outside of the whitelist")]
    OutsideWhitelist(Date),
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}
