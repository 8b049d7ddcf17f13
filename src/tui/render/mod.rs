pub mod hints;
pub mod suggestions;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: trigger box, suggestion list when open, hints row.
/// Rebuilds the click targets as it goes.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    app.hits.clear();

    // Layout: content | hints row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let content = chunks[0];

    let trigger_h = trigger::trigger_height(app, content.width).min(content.height);
    let trigger_area = Rect {
        height: trigger_h,
        ..content
    };
    for (rect, target) in trigger::render_trigger(frame, app, trigger_area) {
        app.hits.push(rect, target);
    }

    let panel_h = suggestions::panel_height(app).min(content.height - trigger_h);
    if panel_h > 0 {
        let panel_area = Rect {
            y: content.y + trigger_h,
            height: panel_h,
            ..content
        };
        for (rect, target) in suggestions::render_suggestions(frame, app, panel_area) {
            app.hits.push(rect, target);
        }
    }

    hints::render_hints(frame, app, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::tui::app::Target;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_screen() {
        let mut app = app_with(&["react"], PickerConfig::default());
        let output = render_to_string(30, 10, |frame, _| {
            render(frame, &mut app);
        });
        assert_snapshot!(output, @r"
┌────────────────────────────┐
│[React ×] Select...         │
└────────────────────────────┘
┌────────────────────────────┐
│ ▸ Angular                  │
│   React                  ✓ │
│   Vue                      │
└────────────────────────────┘

1 selected    ^D done  ^C quit
");
        assert_eq!(app.hits.hit(8, 1), Some(&Target::RemoveBadge("react".into())));
        assert_eq!(app.hits.hit(12, 1), Some(&Target::Input));
        assert_eq!(app.hits.hit(5, 6), Some(&Target::Candidate("vue".into())));
        assert_eq!(app.hits.hit(5, 9), None);
    }

    #[test]
    fn closed_list_is_not_drawn() {
        let mut app = app_with(&[], PickerConfig::default());
        app.blur();
        let output = render_to_string(30, 6, |frame, _| {
            render(frame, &mut app);
        });
        assert!(!output.contains("Angular"));
        assert!(output.contains("Select..."));
        assert_eq!(app.hits.hit(5, 4), None);
    }
}
