use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Target};
use crate::util::unicode::{display_width, truncate_to_width};

/// Maximum number of visible entries in the list
const MAX_VISIBLE: usize = 8;

/// Rows the open list needs, borders included. Zero when closed.
pub fn panel_height(app: &App) -> u16 {
    let Ok(state) = app.picker.state() else {
        return 0;
    };
    if !state.is_open() {
        return 0;
    }
    let count = app.picker.suggestions().map_or(0, |s| s.len());
    count.clamp(1, MAX_VISIBLE) as u16 + 2
}

/// First row of a `visible`-row window that keeps `highlight` in view
fn scroll_start(highlight: usize, visible: usize) -> usize {
    if visible > 0 && highlight >= visible {
        highlight + 1 - visible
    } else {
        0
    }
}

/// Render the suggestion list below the trigger. Returns the click targets.
pub fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) -> Vec<(Rect, Target)> {
    let mut hits = Vec::new();
    let (Ok(state), Ok(suggestions)) = (app.picker.state(), app.picker.suggestions()) else {
        return hits;
    };

    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);

    let empty_text = if app.picker.config().loading {
        Some("Loading\u{2026}")
    } else if suggestions.is_empty() {
        Some("No results found")
    } else {
        None
    };
    if let Some(text) = empty_text {
        let line = Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return hits;
    }

    let width = inner.width as usize;
    let label_width = width.saturating_sub(5);
    let highlight = state.highlight().min(suggestions.len() - 1);
    let visible = MAX_VISIBLE.min(inner.height as usize);
    let start = scroll_start(highlight, visible);

    let mut lines: Vec<Line> = Vec::new();
    for (i, entry) in suggestions.iter().skip(start).take(visible).enumerate()
    {
        let is_highlighted = start + i == highlight;
        let style = if is_highlighted {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };

        let prefix = if is_highlighted { " \u{25B8} " } else { "   " };
        let label = truncate_to_width(&entry.item.display, label_width);
        let pad = label_width.saturating_sub(display_width(&label));
        let check = if entry.checked { "\u{2713} " } else { "  " };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{}{}", label, " ".repeat(pad)), style),
            Span::styled(check, style.fg(app.theme.green)),
        ]));
        hits.push((
            Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
            Target::Candidate(entry.item.key.clone()),
        ));
    }

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
    hits
}
