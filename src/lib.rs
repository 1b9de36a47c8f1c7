//! A week-range selector for terminal interfaces.
//!
//! [`WeekPager`] holds the selected week and decides whether the user may move
//! to the previous or next one, given an optional [`Whitelist`] of dates.
//! [`WeekSelector`] draws it with `ratatui` as a single line such as
//! `◀  29 March - 04 April  ▶`, leaving out whichever arrow would lead outside
//! the whitelist.
//!
//! ```
//! use time::{macros::date, Date};
//! use weekpager::{OnWeekChanged, WeekPager, Whitelist};
//!
//! let whitelist = Whitelist::between(date!(2021 - 03 - 01), date!(2021 - 03 - 31))?;
//! let mut changes = Vec::new();
//! let mut pager = WeekPager::new(date!(2021 - 03 - 01))
//!     .with_whitelist(whitelist)
//!     .with_observer(OnWeekChanged(|first_day: Date| changes.push(first_day)));
//! assert!(!pager.can_go_previous());
//! assert_eq!(pager.label()?, "01 - 07 March");
//! pager.go_next()?;
//! assert_eq!(pager.label()?, "08 - 14 March");
//! drop(pager);
//! assert_eq!(changes, [date!(2021 - 03 - 08)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod selector;
pub use crate::selector::*;
