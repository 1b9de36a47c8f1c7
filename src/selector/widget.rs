use super::nav::{NavigationError, WeekObserver, WeekPager};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};
use std::fmt;
use std::marker::PhantomData;
use time::Date;

/// Columns between each control and the label
const LABEL_MARGIN: u16 = 2;

/// Cells around a control in every direction that still count as pressing it
const HIT_SLOP: u16 = 1;

const DEFAULT_PREVIOUS: &str = "◀";
const DEFAULT_NEXT: &str = "▶";

/// Something that can be drawn in the slot of a previous or next control
pub trait Control {
    /// Number of columns the control occupies
    fn width(&self) -> u16;

    /// Draw the control into `area`, which is [`Control::width`] columns wide
    /// and one row high
    fn render_control(self, area: Rect, buf: &mut Buffer);
}

impl Control for Line<'_> {
    fn width(&self) -> u16 {
        u16::try_from(Line::width(self)).unwrap_or(u16::MAX)
    }

    fn render_control(self, area: Rect, buf: &mut Buffer) {
        self.render(area, buf);
    }
}

impl Control for Span<'_> {
    fn width(&self) -> u16 {
        u16::try_from(Span::width(self)).unwrap_or(u16::MAX)
    }

    fn render_control(self, area: Rect, buf: &mut Buffer) {
        self.render(area, buf);
    }
}

impl Control for &str {
    fn width(&self) -> u16 {
        Control::width(&Line::raw(*self))
    }

    fn render_control(self, area: Rect, buf: &mut Buffer) {
        Line::raw(self).render(area, buf);
    }
}

/// A control drawn by a closure into a slot of a fixed width.  Any ratatui
/// widget can be used as a control this way:
///
/// ```
/// use ratatui::{buffer::Buffer, layout::Rect, widgets::{Paragraph, Widget}};
/// use weekpager::{ControlFn, NoObserver, WeekSelector};
///
/// let selector = WeekSelector::<NoObserver>::new()
///     .previous_control(ControlFn::new(4, |area: Rect, buf: &mut Buffer| {
///         Paragraph::new("prev").render(area, buf);
///     }));
/// # let _ = selector;
/// ```
#[derive(Clone, Copy)]
pub struct ControlFn<F> {
    width: u16,
    draw: F,
}

impl<F: FnOnce(Rect, &mut Buffer)> ControlFn<F> {
    pub fn new(width: u16, draw: F) -> ControlFn<F> {
        ControlFn { width, draw }
    }
}

impl<F: FnOnce(Rect, &mut Buffer)> Control for ControlFn<F> {
    fn width(&self) -> u16 {
        self.width
    }

    fn render_control(self, area: Rect, buf: &mut Buffer) {
        (self.draw)(area, buf);
    }
}

impl<F> fmt::Debug for ControlFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlFn")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// A one-line week selector: the label for the selected week flanked by
/// controls for moving to the previous and next weeks.
///
/// A control is left out entirely, taking up no columns, when the pager's
/// whitelist does not permit moving in its direction.  The row is drawn
/// left-aligned and vertically centered within the area it is given.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekSelector<O, P = Line<'static>, N = Line<'static>> {
    style: Style,
    selector_style: Style,
    label_style: Style,
    previous: P,
    next: N,
    _data: PhantomData<O>,
}

impl<O> WeekSelector<O> {
    pub fn new() -> WeekSelector<O> {
        WeekSelector {
            style: Style::new(),
            selector_style: Style::new(),
            label_style: Style::new(),
            previous: Line::raw(DEFAULT_PREVIOUS),
            next: Line::raw(DEFAULT_NEXT),
            _data: PhantomData,
        }
    }
}

impl<O, P, N> WeekSelector<O, P, N> {
    /// Style for the whole area of the widget
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style for the cells occupied by the previous & next controls
    pub fn selector_style(mut self, style: Style) -> Self {
        self.selector_style = style;
        self
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Draw `control` in place of the default previous-week arrow
    pub fn previous_control<C: Control>(self, control: C) -> WeekSelector<O, C, N> {
        WeekSelector {
            style: self.style,
            selector_style: self.selector_style,
            label_style: self.label_style,
            previous: control,
            next: self.next,
            _data: PhantomData,
        }
    }

    /// Draw `control` in place of the default next-week arrow
    pub fn next_control<C: Control>(self, control: C) -> WeekSelector<O, P, C> {
        WeekSelector {
            style: self.style,
            selector_style: self.selector_style,
            label_style: self.label_style,
            previous: self.previous,
            next: control,
            _data: PhantomData,
        }
    }
}

impl<O> Default for WeekSelector<O> {
    fn default() -> Self {
        WeekSelector::new()
    }
}

impl<O, P: Control, N: Control> StatefulWidget for WeekSelector<O, P, N> {
    type State = WeekSelectorState<O>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.previous_hitbox = None;
        state.next_hitbox = None;
        buf.set_style(area, self.style);
        if area.is_empty() {
            return;
        }
        let row = Rect {
            y: area.y + (area.height - 1) / 2,
            height: 1,
            ..area
        };
        let pager = &state.pager;
        let label = pager.label().unwrap_or_else(|e| {
            log::warn!("Could not format label for {}: {e}", pager.anchor());
            pager.anchor().to_string()
        });
        let label = Line::styled(label, self.label_style);
        let previous = pager.can_go_previous().then_some(self.previous);
        let next = pager.can_go_next().then_some(self.next);
        let [previous_area, label_area, next_area] = Layout::horizontal([
            Constraint::Length(previous.as_ref().map_or(0, Control::width)),
            Constraint::Length(Control::width(&label)),
            Constraint::Length(next.as_ref().map_or(0, Control::width)),
        ])
        .spacing(LABEL_MARGIN)
        .flex(Flex::Start)
        .areas(row);
        label.render(label_area, buf);
        if let Some(control) = previous {
            buf.set_style(previous_area, self.selector_style);
            control.render_control(previous_area, buf);
            state.previous_hitbox = Some(hitbox(previous_area, area));
        }
        if let Some(control) = next {
            buf.set_style(next_area, self.selector_style);
            control.render_control(next_area, buf);
            state.next_hitbox = Some(hitbox(next_area, area));
        }
    }
}

/// Grow `control` by [`HIT_SLOP`] on every side without leaving `bounds`
fn hitbox(control: Rect, bounds: Rect) -> Rect {
    let left = control.left().saturating_sub(HIT_SLOP).max(bounds.left());
    let top = control.top().saturating_sub(HIT_SLOP).max(bounds.top());
    let right = control.right().saturating_add(HIT_SLOP).min(bounds.right());
    let bottom = control.bottom().saturating_add(HIT_SLOP).min(bounds.bottom());
    Rect {
        x: left,
        y: top,
        width: right.saturating_sub(left),
        height: bottom.saturating_sub(top),
    }
}

/// State for a [`WeekSelector`]: the pager plus where its controls were last
/// drawn
#[derive(Clone, Debug)]
pub struct WeekSelectorState<O> {
    pager: WeekPager<O>,
    previous_hitbox: Option<Rect>,
    next_hitbox: Option<Rect>,
}

impl<O> WeekSelectorState<O> {
    pub fn new(pager: WeekPager<O>) -> WeekSelectorState<O> {
        WeekSelectorState {
            pager,
            previous_hitbox: None,
            next_hitbox: None,
        }
    }

    pub fn pager(&self) -> &WeekPager<O> {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut WeekPager<O> {
        &mut self.pager
    }

    pub fn into_pager(self) -> WeekPager<O> {
        self.pager
    }

    /// The region that activates the previous-week control, or `None` if the
    /// control was not drawn on the last render
    pub fn previous_hitbox(&self) -> Option<Rect> {
        self.previous_hitbox
    }

    /// The region that activates the next-week control, or `None` if the
    /// control was not drawn on the last render
    pub fn next_hitbox(&self) -> Option<Rect> {
        self.next_hitbox
    }
}

impl<O: WeekObserver> WeekSelectorState<O> {
    /// Activate whichever control was drawn at the given cell on the last
    /// render.  Returns `None` if no control is there.
    pub fn press(&mut self, column: u16, row: u16) -> Option<Result<Date, NavigationError>> {
        let pos = Position::new(column, row);
        if self.previous_hitbox.is_some_and(|r| r.contains(pos)) {
            Some(self.pager.go_previous())
        } else if self.next_hitbox.is_some_and(|r| r.contains(pos)) {
            Some(self.pager.go_next())
        } else {
            None
        }
    }
}

impl<O> From<WeekPager<O>> for WeekSelectorState<O> {
    fn from(pager: WeekPager<O>) -> WeekSelectorState<O> {
        WeekSelectorState::new(pager)
    }
}
