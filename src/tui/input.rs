use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::select::{Key, KeyPress};

use super::app::{App, Outcome, Target};

/// Translate a terminal key event into a picker key press.
pub fn to_key_press(key: KeyEvent) -> Option<KeyPress> {
    let code = match key.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(KeyPress {
        key: code,
        // Uppercase letters arrive with SHIFT; that is text, not selection
        shift: key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(code, Key::Char(_)),
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
    })
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.outcome = Some(Outcome::Aborted);
            return;
        }
        KeyCode::Char('d') if ctrl => {
            app.outcome = Some(Outcome::Accepted);
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if app.focused {
                app.blur();
            } else {
                app.focus();
            }
            return;
        }
        _ => {}
    }

    if !app.focused {
        match key.code {
            KeyCode::Enter => app.focus(),
            KeyCode::Esc | KeyCode::Char('q') => app.outcome = Some(Outcome::Accepted),
            _ => {}
        }
        return;
    }

    if let Some(press) = to_key_press(key) {
        app.picker.key(press);
    }
}

/// Handle a mouse event against the click targets of the last frame
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    match app.hits.hit(mouse.column, mouse.row).cloned() {
        Some(Target::Input) => {
            if !app.focused {
                app.focus();
            }
            app.picker.click_input();
        }
        Some(Target::RemoveBadge(key)) => {
            app.picker.remove(&key);
        }
        Some(Target::Candidate(key)) => {
            app.picker.pick(&key);
        }
        None => {
            if app.focused {
                app.blur();
            }
        }
    }
}
