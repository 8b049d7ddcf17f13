use std::collections::HashSet;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::Item;

/// Error type for candidate list loading
#[derive(Debug, thiserror::Error)]
pub enum ItemsError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse {path}: {source}")]
    TomlError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unsupported items file {0}: expected .json or .toml")]
    UnsupportedFormat(PathBuf),
    #[error("duplicate item key: {0}")]
    DuplicateKey(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// Load candidates from a `.json` array or a `.toml` file with `[[items]]`.
pub fn read_items(path: &Path) -> Result<Vec<Item>, ItemsError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let text = fs::read_to_string(path).map_err(|e| ItemsError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let items = match ext.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|e| ItemsError::JsonError {
            path: path.to_path_buf(),
            source: e,
        })?,
        Some("toml") => {
            let file: ItemsFile = toml::from_str(&text).map_err(|e| ItemsError::TomlError {
                path: path.to_path_buf(),
                source: e,
            })?;
            file.items
        }
        _ => return Err(ItemsError::UnsupportedFormat(path.to_path_buf())),
    };
    check_unique(&items)?;
    Ok(items)
}

/// Parse one candidate per line: `key<TAB>display`, or a bare line used as
/// both. Blank lines are skipped.
pub fn parse_lines(reader: impl BufRead) -> Result<Vec<Item>, ItemsError> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let item = match line.split_once('\t') {
            Some((key, display)) => Item::new(key.trim(), display.trim()),
            None => Item::new(line.trim(), line.trim()),
        };
        items.push(item);
    }
    check_unique(&items)?;
    Ok(items)
}

/// Reject candidate sets that reuse a key.
pub fn check_unique(items: &[Item]) -> Result<(), ItemsError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.key.as_str()) {
            return Err(ItemsError::DuplicateKey(item.key.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_json_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("items.json");
        fs::write(
            &path,
            r#"[{"key":"react","display":"React"},{"key":"vue","display":"Vue"}]"#,
        )
        .unwrap();
        let items = read_items(&path).unwrap();
        assert_eq!(items, vec![Item::new("react", "React"), Item::new("vue", "Vue")]);
    }

    #[test]
    fn reads_toml_tables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("items.TOML");
        fs::write(&path, "[[items]]\nkey = \"vue\"\ndisplay = \"Vue\"\n").unwrap();
        assert_eq!(read_items(&path).unwrap(), vec![Item::new("vue", "Vue")]);
    }

    #[test]
    fn rejects_other_extensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("items.yaml");
        fs::write(&path, "- vue\n").unwrap();
        assert!(matches!(
            read_items(&path),
            Err(ItemsError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn lines_with_and_without_tabs() {
        let input = "react\tReact\n\nVue\r\n  \nangular\t Angular \n";
        let items = parse_lines(input.as_bytes()).unwrap();
        assert_eq!(
            items,
            vec![
                Item::new("react", "React"),
                Item::new("Vue", "Vue"),
                Item::new("angular", "Angular"),
            ]
        );
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = parse_lines("a\nb\na\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "duplicate item key: a");
    }
}
