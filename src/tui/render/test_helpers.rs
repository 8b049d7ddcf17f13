use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

pub use crate::model::{Item, PickerConfig};
use crate::select::MultiSelect;
use crate::tui::app::App;
use crate::tui::theme::Theme;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn frameworks() -> Vec<Item> {
    vec![
        Item::new("angular", "Angular"),
        Item::new("react", "React"),
        Item::new("vue", "Vue"),
    ]
}

/// A focused app over `candidates` with `selected` keys already chosen.
pub fn app_from(candidates: Vec<Item>, selected: &[&str], config: PickerConfig) -> App {
    let initial = selected
        .iter()
        .filter_map(|key| candidates.iter().find(|c| c.key == *key).cloned())
        .collect();
    let picker = MultiSelect::new(config, candidates, initial);
    let mut app = App::new(picker, Theme::default());
    app.focus();
    app
}

/// A focused app over Angular, React and Vue.
pub fn app_with(selected: &[&str], config: PickerConfig) -> App {
    app_from(frameworks(), selected, config)
}
