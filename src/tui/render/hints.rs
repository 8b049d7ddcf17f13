use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const FOCUSED_HINTS: [&str; 2] = [
    "\u{2190}\u{2192} badges  \u{2191}\u{2193} move  Enter pick  ^D done",
    "^D done  ^C quit",
];
const BLURRED_HINTS: [&str; 2] = ["Tab focus  q done  ^C quit", "q done"];

/// Widest hint that still leaves a gap after `used` cells.
fn pick_hint(hints: &[&'static str], used: usize, width: usize) -> Option<&'static str> {
    hints
        .iter()
        .copied()
        .find(|hint| used + display_width(hint) < width)
}

/// Render the bottom row: selection count on the left, key hints on the right.
pub fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let count = format!("{} selected", app.picker.values().len());
    let count_width = display_width(&count);
    let mut spans = vec![Span::styled(count, dim)];

    let hints: &[&'static str] = if app.focused {
        &FOCUSED_HINTS
    } else {
        &BLURRED_HINTS
    };
    if app.show_key_hints
        && let Some(hint) = pick_hint(hints, count_width, width)
    {
        let padding = width - count_width - display_width(hint);
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
