use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::select::{MultiSelect, Selection};

use super::input;
use super::render;
use super::theme::Theme;

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Aborted,
}

/// Something the mouse can land on, recorded while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Input,
    /// Remove affordance of the badge for this key
    RemoveBadge(String),
    /// Suggestion row for this candidate key
    Candidate(String),
}

/// Click targets of the last frame. Later entries sit on top.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: Target) {
        self.regions.push((area, target));
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<&Target> {
        let pos = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, target)| target)
    }
}

/// Main application state
pub struct App {
    pub picker: MultiSelect,
    pub theme: Theme,
    /// Whether the picker holds terminal focus (the blur/focus pair)
    pub focused: bool,
    pub show_key_hints: bool,
    pub outcome: Option<Outcome>,
    pub hits: HitMap,
}

impl App {
    pub fn new(picker: MultiSelect, theme: Theme) -> Self {
        App {
            picker,
            theme,
            focused: false,
            show_key_hints: true,
            outcome: None,
            hits: HitMap::default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.picker.focus();
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.picker.blur();
    }
}

/// Run the TUI. Returns the final selection when accepted, None when aborted.
///
/// Draws on stderr so the caller can print the result to stdout.
pub fn run(mut app: App) -> Result<Option<Selection>, Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(
        stderr,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stderr(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    app.focus();
    tracing::info!(candidates = app.picker.candidates().len(), "tui started");
    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result?;

    let outcome = app.outcome;
    app.picker.unmount();
    tracing::info!(?outcome, selected = app.picker.values().len(), "tui finished");
    match outcome {
        Some(Outcome::Accepted) => Ok(Some(app.picker.values().clone())),
        _ => Ok(None),
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::FocusLost => app.blur(),
                Event::FocusGained => app.focus(),
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_regions_win() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 3), Target::Input);
        hits.push(Rect::new(2, 1, 3, 1), Target::RemoveBadge("vue".into()));
        assert_eq!(hits.hit(3, 1), Some(&Target::RemoveBadge("vue".into())));
        assert_eq!(hits.hit(0, 0), Some(&Target::Input));
        assert_eq!(hits.hit(10, 0), None);
        hits.clear();
        assert_eq!(hits.hit(0, 0), None);
    }
}
