use std::cell::Cell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, items_io};
use crate::model::{Direction, FileConfig, Item, PickerConfig};
use crate::select::{MultiSelect, script};
use crate::tui::theme::Theme;
use crate::tui::{self, App};

/// Errors that only exist at the command line
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("--select: no candidate with key {0:?}")]
    UnknownKey(String),
    #[error("aborted")]
    Aborted,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let file = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let json = cli.json;

    match &cli.command {
        None => cmd_pick(&cli, file, json),
        Some(Commands::Filter(args)) => cmd_filter(&cli, file, args, json),
        Some(Commands::Replay(args)) => cmd_replay(&cli, file, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Candidates from `--items` (a file, or `-` for stdin) or the config's `[[items]]`.
fn load_candidates(
    source: Option<&str>,
    file: &mut FileConfig,
) -> Result<Vec<Item>, items_io::ItemsError> {
    match source {
        Some("-") => items_io::parse_lines(io::stdin().lock()),
        Some(path) => items_io::read_items(Path::new(path)),
        None => {
            let items = std::mem::take(&mut file.items);
            items_io::check_unique(&items)?;
            Ok(items)
        }
    }
}

/// Apply command-line overrides on top of the `[picker]` table.
fn picker_config(cli: &Cli, mut config: PickerConfig) -> PickerConfig {
    if cli.loop_nav {
        config.loop_nav = true;
    }
    if cli.rtl {
        config.direction = Direction::Rtl;
    }
    if let Some(placeholder) = &cli.placeholder {
        config.placeholder = placeholder.clone();
    }
    if !cli.select.is_empty() {
        config.selected = cli.select.clone();
    }
    config
}

/// Look up the initially selected keys among the candidates.
fn initial_selection(keys: &[String], candidates: &[Item]) -> Result<Vec<Item>, CliError> {
    keys.iter()
        .map(|key| {
            candidates
                .iter()
                .find(|c| &c.key == key)
                .cloned()
                .ok_or_else(|| CliError::UnknownKey(key.clone()))
        })
        .collect()
}

fn build_picker(cli: &Cli, file: &mut FileConfig) -> Result<MultiSelect, Box<dyn std::error::Error>> {
    let candidates = load_candidates(cli.items.as_deref(), file)?;
    let config = picker_config(cli, std::mem::take(&mut file.picker));
    let initial = initial_selection(&config.selected, &candidates)?;
    tracing::info!(
        candidates = candidates.len(),
        selected = initial.len(),
        "picker ready"
    );
    Ok(MultiSelect::new(config, candidates, initial))
}

fn print(out: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_pick(cli: &Cli, mut file: FileConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let picker = build_picker(cli, &mut file)?.on_values_change(|values| {
        tracing::debug!(count = values.len(), "values changed");
    });
    let mut app = App::new(picker, Theme::from_config(&file.ui));
    app.show_key_hints = file.ui.show_key_hints;

    let Some(values) = tui::run(app)? else {
        return Err(Box::new(CliError::Aborted));
    };
    if json {
        println!("{}", serde_json::to_string_pretty(values.as_slice())?);
    } else {
        print(&format_selection(&values))?;
    }
    Ok(())
}

fn cmd_filter(
    cli: &Cli,
    mut file: FileConfig,
    args: &FilterArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut picker = build_picker(cli, &mut file)?;
    script::run(&mut picker, &[script::Step::Type(args.query.clone())])?;
    let rows = picker.suggestions()?;

    if json {
        let out: Vec<CandidateJson> = rows.iter().map(CandidateJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print(&format_candidates(&rows))?;
    }
    Ok(())
}

fn cmd_replay(
    cli: &Cli,
    mut file: FileConfig,
    args: &ReplayArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let steps = script::parse_script(&args.script)?;
    let changes = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&changes);
    let mut picker = build_picker(cli, &mut file)?.on_values_change(move |_| {
        counter.set(counter.get() + 1);
    });
    script::run(&mut picker, &steps)?;

    let state = picker.state()?;
    let out = StateJson {
        selected: picker.values().as_slice(),
        query: state.query(),
        active: active_number(state),
        open: state.is_open(),
        // Enter on a closed list only opens it
        highlighted: picker
            .highlighted()
            .filter(|_| state.is_open())
            .map(|item| item.key.as_str()),
        changes: changes.get(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print(&format_state(&out))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn frameworks() -> Vec<Item> {
        vec![
            Item::new("angular", "Angular"),
            Item::new("react", "React"),
            Item::new("vue", "Vue"),
        ]
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "mpick",
            "--loop",
            "--rtl",
            "--placeholder",
            "Pick",
            "--select",
            "vue",
        ])
        .unwrap();
        let base = PickerConfig {
            selected: vec!["react".into()],
            ..PickerConfig::default()
        };
        let config = picker_config(&cli, base);
        assert!(config.loop_nav);
        assert_eq!(config.direction, Direction::Rtl);
        assert_eq!(config.placeholder, "Pick");
        assert_eq!(config.selected, vec!["vue"]);
    }

    #[test]
    fn config_selection_kept_without_flag() {
        let cli = Cli::try_parse_from(["mpick"]).unwrap();
        let base = PickerConfig {
            selected: vec!["react".into()],
            ..PickerConfig::default()
        };
        let config = picker_config(&cli, base);
        assert_eq!(config.selected, vec!["react"]);
        assert!(!config.loop_nav);
    }

    #[test]
    fn initial_keys_resolve_in_order() {
        let items = initial_selection(&["vue".into(), "angular".into()], &frameworks()).unwrap();
        assert_eq!(
            items.iter().map(|i| i.key.as_str()).collect::<Vec<_>>(),
            vec!["vue", "angular"]
        );
        let err = initial_selection(&["svelte".into()], &frameworks()).unwrap_err();
        assert_eq!(err.to_string(), "--select: no candidate with key \"svelte\"");
    }

    #[test]
    fn config_items_are_the_default_source() {
        let mut file = FileConfig {
            items: frameworks(),
            ..FileConfig::default()
        };
        let items = load_candidates(None, &mut file).unwrap();
        assert_eq!(items.len(), 3);

        let mut file = FileConfig {
            items: vec![Item::new("a", "A"), Item::new("a", "Again")],
            ..FileConfig::default()
        };
        assert!(load_candidates(None, &mut file).is_err());
    }
}
