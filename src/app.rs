use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::{BASE_STYLE, LABEL_STYLE, SELECTOR_STYLE, STATUS_STYLE};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Margin, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;
use weekpager::{NavigationError, WeekObserver, WeekSelector, WeekSelectorState};

/// Observer that logs week changes and remembers the latest one for the
/// status line
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct WeekLog {
    latest: Option<Date>,
}

impl WeekObserver for WeekLog {
    fn week_changed(&mut self, first_day: Date) {
        log::info!("Selected the week starting {first_day}");
        self.latest = Some(first_day);
    }

    fn previous_pressed(&mut self, anchor: Date) {
        log::debug!("Previous week requested; anchor date is now {anchor}");
    }

    fn next_pressed(&mut self, anchor: Date) {
        log::debug!("Next week requested; anchor date is now {anchor}");
    }
}

#[derive(Clone, Debug)]
pub(crate) struct App {
    selector: WeekSelectorState<WeekLog>,
    state: AppState,
}

impl App {
    pub(crate) fn new(selector: WeekSelectorState<WeekLog>) -> App {
        App {
            selector,
            state: AppState::Selecting,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if !self.handle_click(column, row) {
                    self.beep()?;
                }
            }
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Selecting => match key {
                KeyCode::Char('h' | 'p') | KeyCode::Left => self.previous_week(),
                KeyCode::Char('l' | 'n') | KeyCode::Right => self.next_week(),
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Selecting;
                true
            }
            AppState::Jumping(state) => {
                let input = match key {
                    KeyCode::Char('q' | 'g') | KeyCode::Esc => {
                        self.state = AppState::Selecting;
                        return true;
                    }
                    KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(d) => JumpToInput::Digit(d),
                        None => return false,
                    },
                    KeyCode::Backspace | KeyCode::Delete => JumpToInput::Backspace,
                    KeyCode::Enter => JumpToInput::Enter,
                    _ => return false,
                };
                match state.handle_input(input) {
                    JumpToOutput::Ok => true,
                    JumpToOutput::Invalid => false,
                    JumpToOutput::Jump(date) => {
                        self.state = AppState::Selecting;
                        self.jump_to(date)
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click landed on a control that refused to move
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        if self.state != AppState::Selecting {
            return true;
        }
        !matches!(self.selector.press(column, row), Some(Err(_)))
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn previous_week(&mut self) -> bool {
        accepted(self.selector.pager_mut().go_previous())
    }

    fn next_week(&mut self) -> bool {
        accepted(self.selector.pager_mut().go_next())
    }

    fn reset(&mut self) -> bool {
        accepted(self.selector.pager_mut().jump_to_today())
    }

    fn jump_to(&mut self, date: Date) -> bool {
        accepted(self.selector.pager_mut().jump_to(date))
    }

    fn status(&self) -> String {
        match self.selector.pager().observer().and_then(|log| log.latest) {
            Some(first_day) => format!("Selected the week starting {first_day}"),
            None => String::from("Press ? for help"),
        }
    }
}

fn accepted(r: Result<Date, NavigationError>) -> bool {
    r.inspect_err(|e| log::debug!("Navigation rejected: {e}"))
        .is_ok()
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [selector_area, _, status_area] = Layout::vertical([Constraint::Length(1); 3])
            .flex(Flex::Start)
            .areas(area.inner(Margin::new(1, 1)));
        WeekSelector::new()
            .selector_style(SELECTOR_STYLE)
            .label_style(LABEL_STYLE)
            .render(selector_area, buf, &mut self.selector);
        Line::styled(self.status(), STATUS_STYLE).render(status_area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Selecting,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
