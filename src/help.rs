use crate::theme::{help::KEY_STYLE, BASE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{HorizontalAlignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

static BINDINGS: &[(&str, &str)] = &[
    ("h  p  ←", "Previous week"),
    ("l  n  →", "Next week"),
    ("0  Home", "Back to today"),
    ("g", "Go to a date"),
    ("?", "This help"),
    ("q  Esc", "Quit"),
];

static FOOTER: &[&str] = &[
    "Clicking an arrow also changes the week.",
    "Press any key to close.",
];

/// Overlay listing the key bindings, centered over whatever it's drawn on
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        let key_width = BINDINGS
            .iter()
            .map(|&(keys, _)| Line::raw(keys).width())
            .max()
            .unwrap_or_default();
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, action)| {
                Line::from(vec![
                    Span::styled(format!("{keys:<key_width$}"), KEY_STYLE),
                    Span::raw("   "),
                    Span::raw(action),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.extend(FOOTER.iter().map(|&s| Line::raw(s)));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Self::text();
        // Border plus one column of padding on each side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let popup = centered(area, width, height);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .style(BASE_STYLE)
            .block(
                Block::bordered()
                    .title(" Keys ")
                    .title_alignment(HorizontalAlignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .render(popup, buf);
    }
}

/// A `width` × `height` rectangle in the middle of `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(area: Rect) -> Vec<String> {
        let mut buffer = Buffer::empty(area);
        Help.render(area, &mut buffer);
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_centered() {
        assert_eq!(
            centered(Rect::new(0, 0, 20, 10), 10, 4),
            Rect::new(5, 3, 10, 4)
        );
        assert_eq!(
            centered(Rect::new(2, 1, 8, 3), 10, 4),
            Rect::new(2, 1, 8, 3)
        );
    }

    #[test]
    fn test_render() {
        let lines = rendered(Rect::new(0, 0, 50, 13));
        assert!(lines[1].contains("┌─"), "{:?}", lines[1]);
        assert!(lines[1].contains(" Keys "), "{:?}", lines[1]);
        assert!(
            lines[2].contains("│ h  p  ←   Previous week"),
            "{:?}",
            lines[2]
        );
        assert!(lines[5].contains("│ g         Go to a date"), "{:?}", lines[5]);
        assert!(lines[11].contains("└─"), "{:?}", lines[11]);
    }

    #[test]
    fn test_render_tiny_area() {
        // Clipped rather than panicking
        let lines = rendered(Rect::new(0, 0, 6, 2));
        assert_eq!(lines.len(), 2);
    }
}
