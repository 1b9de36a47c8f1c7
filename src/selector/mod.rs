mod label;
mod nav;
mod week;
mod widget;
pub use self::label::{LabelError, LabelFormat};
pub use self::nav::{
    can_go_next, can_go_previous, NavigationError, NoObserver, OnWeekChanged, WeekObserver,
    WeekPager, Whitelist, WhitelistError,
};
pub use self::week::{OutOfTimeError, WeekStart, WeekStartError, WeekWindow};
pub use self::widget::{Control, ControlFn, WeekSelector, WeekSelectorState};
