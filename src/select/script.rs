//! Headless event scripts, e.g. `type:an enter left backspace`.

use super::keys::{Key, KeyPress};
use super::picker::MultiSelect;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown script step: {0:?}")]
    UnknownStep(String),
    #[error("script step {0:?} needs a value after ':'")]
    MissingValue(String),
    #[error("no candidate with key {0:?}")]
    UnknownCandidate(String),
    #[error("no selected item with key {0:?}")]
    NotSelected(String),
}

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(KeyPress),
    /// Type each character in turn.
    Type(String),
    Focus,
    Blur,
    ClickInput,
    /// Click a candidate.
    Pick(String),
    /// Click a badge's remove affordance.
    Remove(String),
}

fn named_key(name: &str) -> Option<Key> {
    let key = match name {
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "home" => Key::Home,
        "end" => Key::End,
        "backspace" | "bs" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "enter" | "return" => Key::Enter,
        "esc" | "escape" => Key::Escape,
        "tab" => Key::Tab,
        "space" => Key::Char(' '),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
    };
    Some(key)
}

fn valued(token: &str, value: &str) -> Result<String, ScriptError> {
    if value.is_empty() {
        return Err(ScriptError::MissingValue(token.to_string()));
    }
    Ok(value.to_string())
}

/// Parse one whitespace-free token. Names are case-insensitive; the value
/// after `type:`, `pick:` or `remove:` is taken verbatim.
pub fn parse_step(token: &str) -> Result<Step, ScriptError> {
    if let Some((head, value)) = token.split_once(':') {
        return match head.to_ascii_lowercase().as_str() {
            "type" => Ok(Step::Type(valued(token, value)?)),
            "pick" => Ok(Step::Pick(valued(token, value)?)),
            "remove" => Ok(Step::Remove(valued(token, value)?)),
            _ => Err(ScriptError::UnknownStep(token.to_string())),
        };
    }

    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "focus" => return Ok(Step::Focus),
        "blur" => return Ok(Step::Blur),
        "click-input" | "click" => return Ok(Step::ClickInput),
        "select-all" => return Ok(Step::Key(KeyPress::ctrl(Key::Char('a')))),
        _ => {}
    }

    let (shift, ctrl, name) = if let Some(rest) = lower.strip_prefix("shift+") {
        (true, false, rest)
    } else if let Some(rest) = lower.strip_prefix("ctrl+") {
        (false, true, rest)
    } else {
        (false, false, lower.as_str())
    };
    let key = named_key(name).ok_or_else(|| ScriptError::UnknownStep(token.to_string()))?;
    Ok(Step::Key(KeyPress { key, shift, ctrl }))
}

/// Parse every whitespace-separated token of every argument.
pub fn parse_script<S: AsRef<str>>(args: &[S]) -> Result<Vec<Step>, ScriptError> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .map(|token| parse_step(&token))
        .collect()
}

/// Feed steps to a picker in order.
pub fn run(picker: &mut MultiSelect, steps: &[Step]) -> Result<(), ScriptError> {
    for step in steps {
        tracing::trace!(?step, "script step");
        match step {
            Step::Key(press) => picker.key(*press),
            Step::Type(text) => {
                for c in text.chars() {
                    picker.key(Key::Char(c));
                }
            }
            Step::Focus => picker.focus(),
            Step::Blur => picker.blur(),
            Step::ClickInput => picker.click_input(),
            Step::Pick(key) => {
                if !picker.pick(key) {
                    return Err(ScriptError::UnknownCandidate(key.clone()));
                }
            }
            Step::Remove(key) => {
                if !picker.remove(key) {
                    return Err(ScriptError::NotSelected(key.clone()));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, PickerConfig};

    #[test]
    fn parses_named_and_modified_keys() {
        assert_eq!(parse_step("Left").unwrap(), Step::Key(KeyPress::plain(Key::Left)));
        assert_eq!(
            parse_step("shift+home").unwrap(),
            Step::Key(KeyPress::shift(Key::Home))
        );
        assert_eq!(
            parse_step("ctrl+w").unwrap(),
            Step::Key(KeyPress::ctrl(Key::Char('w')))
        );
        assert_eq!(parse_step("x").unwrap(), Step::Key(KeyPress::plain(Key::Char('x'))));
        assert_eq!(parse_step("focus").unwrap(), Step::Focus);
    }

    #[test]
    fn parses_valued_steps() {
        assert_eq!(parse_step("type:An").unwrap(), Step::Type("An".into()));
        assert_eq!(parse_step("pick:vue").unwrap(), Step::Pick("vue".into()));
        assert_eq!(parse_step("remove:vue").unwrap(), Step::Remove("vue".into()));
        assert_eq!(
            parse_step("type:"),
            Err(ScriptError::MissingValue("type:".into()))
        );
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!(
            parse_step("jump"),
            Err(ScriptError::UnknownStep("jump".into()))
        );
        assert_eq!(
            parse_step("poke:x"),
            Err(ScriptError::UnknownStep("poke:x".into()))
        );
    }

    #[test]
    fn splits_arguments() {
        let steps = parse_script(&["focus type:an", "enter"]).unwrap();
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn runs_against_picker() {
        let mut picker = MultiSelect::new(
            PickerConfig::default(),
            vec![Item::new("angular", "Angular"), Item::new("react", "React")],
            vec![],
        );
        let steps = parse_script(&["focus type:an enter pick:react left"]).unwrap();
        run(&mut picker, &steps).unwrap();
        assert_eq!(
            picker.values().keys().collect::<Vec<_>>(),
            vec!["angular", "react"]
        );
        assert_eq!(picker.state().unwrap().active_index(), Some(1));
    }

    #[test]
    fn unknown_pick_stops_run() {
        let mut picker = MultiSelect::new(PickerConfig::default(), vec![], vec![]);
        let steps = parse_script(&["pick:nope"]).unwrap();
        assert_eq!(
            run(&mut picker, &steps),
            Err(ScriptError::UnknownCandidate("nope".into()))
        );
    }

    #[test]
    fn remove_of_unselected_key_stops_run() {
        let mut picker = MultiSelect::new(
            PickerConfig::default(),
            vec![Item::new("react", "React"), Item::new("vue", "Vue")],
            vec![Item::new("react", "React")],
        );
        let steps = parse_script(&["remove:vue remove:react"]).unwrap();
        assert_eq!(
            run(&mut picker, &steps),
            Err(ScriptError::NotSelected("vue".into()))
        );
        assert_eq!(picker.values().keys().collect::<Vec<_>>(), vec!["react"]);

        let steps = parse_script(&["remove:react"]).unwrap();
        run(&mut picker, &steps).unwrap();
        assert!(picker.values().is_empty());
    }
}
