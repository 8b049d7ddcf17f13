use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Direction;
use crate::tui::app::{App, Target};
use crate::util::unicode::{byte_offset_to_display_col, display_width, truncate_to_width};

const REMOVE_GLYPH: &str = "\u{00D7}";

/// Badge text for a selected item: `[label ×]`
pub fn badge_text(label: &str, max_width: usize) -> String {
    let label = truncate_to_width(label, max_width.saturating_sub(4).max(1));
    format!("[{} {}]", label, REMOVE_GLYPH)
}

/// Greedy row packing: indices of `widths` per row, one cell of gap between
/// neighbours. A segment wider than `max` gets a row to itself.
pub fn layout_rows(widths: &[usize], max: usize) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut used = 0;
    for (i, &w) in widths.iter().enumerate() {
        match rows.last_mut() {
            Some(row) if !row.is_empty() && used + 1 + w <= max => {
                row.push(i);
                used += 1 + w;
            }
            _ => {
                rows.push(vec![i]);
                used = w;
            }
        }
    }
    if rows.is_empty() {
        rows.push(Vec::new());
    }
    rows
}

/// Text shown in the input slot and its width, caret cell included.
fn input_text(app: &App) -> (String, usize) {
    let Ok(state) = app.picker.state() else {
        return (String::new(), 1);
    };
    let query = state.query();
    if query.is_empty() {
        let placeholder = app.picker.config().placeholder.clone();
        let w = display_width(&placeholder).max(1);
        (placeholder, w)
    } else {
        (query.to_string(), display_width(query) + 1)
    }
}

fn segment_widths(app: &App, max: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = app
        .picker
        .values()
        .iter()
        .map(|item| display_width(&badge_text(&item.display, max)))
        .collect();
    widths.push(input_text(app).1.min(max.max(1)));
    widths
}

/// Rows of the trigger box, borders included.
pub fn trigger_height(app: &App, width: u16) -> u16 {
    let max = width.saturating_sub(2) as usize;
    layout_rows(&segment_widths(app, max), max).len() as u16 + 2
}

/// Render the badges and the text input. Returns the click targets.
pub fn render_trigger(frame: &mut Frame, app: &App, area: Rect) -> Vec<(Rect, Target)> {
    let mut hits = vec![(area, Target::Input)];
    let Ok(state) = app.picker.state() else {
        return hits;
    };

    let bg = app.theme.background;
    let text_focused = app.focused && state.active_index().is_none();
    let border_color = if text_focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max = inner.width as usize;
    let values = app.picker.values();
    let widths = segment_widths(app, max);
    let input_index = widths.len() - 1;
    let rows = layout_rows(&widths, max);

    let badge_style = Style::default().fg(app.theme.text).bg(app.theme.badge_bg);
    let active_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.selection_bg)
        .add_modifier(Modifier::BOLD);

    let rtl = app.picker.config().direction == Direction::Rtl;

    let mut lines: Vec<Line> = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let y = inner.y + row_idx as u16;
        let mut spans: Vec<Span> = Vec::new();
        let mut x = 0usize;
        // Right to left: segments run from the right edge, first item rightmost
        let order: Vec<usize> = if rtl {
            let gaps = row.len().saturating_sub(1);
            let used = row.iter().map(|&seg| widths[seg]).sum::<usize>() + gaps;
            x = max.saturating_sub(used);
            if x > 0 {
                spans.push(Span::styled(" ".repeat(x), Style::default().bg(bg)));
            }
            row.iter().rev().copied().collect()
        } else {
            row.clone()
        };
        for (pos, &seg) in order.iter().enumerate() {
            if pos > 0 {
                spans.push(Span::styled(" ", Style::default().bg(bg)));
                x += 1;
            }
            if seg == input_index {
                push_input_spans(&mut spans, app);
                // Caret cell after the text
                let pad = widths[seg].saturating_sub(display_width(&input_text(app).0));
                if pad > 0 {
                    spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
                }
                if text_focused && y < inner.bottom() {
                    let caret_col =
                        byte_offset_to_display_col(state.query(), state.text().caret());
                    let cx = (inner.x as usize + x + caret_col)
                        .min(inner.right().saturating_sub(1) as usize);
                    frame.set_cursor_position(Position::new(cx as u16, y));
                }
            } else if let Some(item) = values.get(seg) {
                let style = if state.active_index() == Some(seg) {
                    active_style
                } else {
                    badge_style
                };
                let label = truncate_to_width(&item.display, max.saturating_sub(4).max(1));
                let label_w = display_width(&label);
                spans.push(Span::styled(format!("[{} ", label), style));
                spans.push(Span::styled(REMOVE_GLYPH, style.fg(app.theme.red)));
                spans.push(Span::styled("]", style));
                let remove_x = inner.x as usize + x + label_w + 2;
                if remove_x < inner.right() as usize && y < inner.bottom() {
                    hits.push((
                        Rect::new(remove_x as u16, y, 1, 1),
                        Target::RemoveBadge(item.key.clone()),
                    ));
                }
            }
            x += widths[seg];
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
    hits
}

fn push_input_spans(spans: &mut Vec<Span<'static>>, app: &App) {
    let Ok(state) = app.picker.state() else {
        return;
    };
    let bg = app.theme.background;
    let query = state.query();
    if query.is_empty() {
        spans.push(Span::styled(
            app.picker.config().placeholder.clone(),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        return;
    }
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    match state.text().selection_range() {
        Some((start, end)) => {
            spans.push(Span::styled(query[..start].to_string(), text_style));
            spans.push(Span::styled(
                query[start..end].to_string(),
                text_style.bg(app.theme.selection_bg),
            ));
            spans.push(Span::styled(query[end..].to_string(), text_style));
        }
        None => spans.push(Span::styled(query.to_string(), text_style)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::Key;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_pack_greedily() {
        assert_eq!(layout_rows(&[9, 7, 9], 28), vec![vec![0, 1, 2]]);
        assert_eq!(layout_rows(&[9, 7, 9], 18), vec![vec![0, 1], vec![2]]);
        assert_eq!(layout_rows(&[30, 3], 10), vec![vec![0], vec![1]]);
        assert_eq!(layout_rows(&[], 10), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn badge_text_truncates_label() {
        assert_eq!(badge_text("React", 40), "[React \u{00D7}]");
        assert_eq!(badge_text("Angular", 8), "[Ang\u{2026} \u{00D7}]");
    }

    #[test]
    fn height_grows_with_rows() {
        let app = app_with(&["react", "vue"], PickerConfig::default());
        assert_eq!(trigger_height(&app, 30), 3);
        assert_eq!(trigger_height(&app, 20), 4);
    }

    #[test]
    fn badges_and_placeholder() {
        let app = app_with(&["react", "vue"], PickerConfig::default());
        let output = render_to_string(30, 3, |frame, area| {
            render_trigger(frame, &app, area);
        });
        assert_snapshot!(output, @r"
┌────────────────────────────┐
│[React ×] [Vue ×] Select... │
└────────────────────────────┘
");
    }

    #[test]
    fn query_replaces_placeholder() {
        let mut app = app_with(&["react"], PickerConfig::default());
        for c in "an".chars() {
            app.picker.key(Key::Char(c));
        }
        let output = render_to_string(20, 3, |frame, area| {
            render_trigger(frame, &app, area);
        });
        assert_snapshot!(output, @r"
┌──────────────────┐
│[React ×] an      │
└──────────────────┘
");
    }

    #[test]
    fn rtl_mirrors_the_row() {
        let config = PickerConfig {
            direction: Direction::Rtl,
            ..PickerConfig::default()
        };
        let mut app = app_with(&["react", "vue"], config);
        // Right walks away from the input, onto the nearest badge
        app.picker.key(Key::Right);
        assert_eq!(app.picker.state().unwrap().active_index(), Some(1));

        let mut hits = Vec::new();
        let output = render_to_string(30, 3, |frame, area| {
            hits = render_trigger(frame, &app, area);
        });
        assert_snapshot!(output, @r"
┌────────────────────────────┐
│ Select... [Vue ×] [React ×]│
└────────────────────────────┘
");
        assert_eq!(
            hits[1..],
            [
                (Rect::new(17, 1, 1, 1), Target::RemoveBadge("vue".into())),
                (Rect::new(27, 1, 1, 1), Target::RemoveBadge("react".into())),
            ]
        );
    }

    #[test]
    fn rtl_query_keeps_caret_cell() {
        let config = PickerConfig {
            direction: Direction::Rtl,
            ..PickerConfig::default()
        };
        let mut app = app_with(&["react"], config);
        for c in "an".chars() {
            app.picker.key(Key::Char(c));
        }
        let mut hits = Vec::new();
        let output = render_to_string(20, 3, |frame, area| {
            hits = render_trigger(frame, &app, area);
        });
        assert_snapshot!(output, @r"
┌──────────────────┐
│     an  [React ×]│
└──────────────────┘
");
        assert_eq!(
            hits[1],
            (Rect::new(17, 1, 1, 1), Target::RemoveBadge("react".into()))
        );
    }

    #[test]
    fn remove_targets_sit_on_the_glyph() {
        let app = app_with(&["react", "vue"], PickerConfig::default());
        let mut hits = Vec::new();
        render_to_string(30, 3, |frame, area| {
            hits = render_trigger(frame, &app, area);
        });
        assert_eq!(hits[0], (Rect::new(0, 0, 30, 3), Target::Input));
        // "│[React ×]": glyph at column 1 + 1 + 5 + 1
        assert_eq!(
            hits[1],
            (Rect::new(8, 1, 1, 1), Target::RemoveBadge("react".into()))
        );
        assert_eq!(
            hits[2],
            (Rect::new(16, 1, 1, 1), Target::RemoveBadge("vue".into()))
        );
    }
}
