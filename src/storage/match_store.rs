use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Match;
use crate::errors::{load_context, parse_context, save_context};

/// File-based source of match logs: a single JSON file or a directory tree of them
pub struct MatchStore {
    max_matches: Option<usize>,
}

impl Default for MatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStore {
    pub fn new() -> Self {
        Self { max_matches: None }
    }

    pub fn with_limit(max_matches: Option<usize>) -> Self {
        Self { max_matches }
    }

    /// Load matches from `input`. Unreadable files inside a directory are skipped with a warning.
    pub fn load_matches<P: AsRef<Path>>(&self, input: P) -> Result<Vec<Match>> {
        let input = input.as_ref();

        if input.is_file() {
            let game = read_json(input, "match")?;
            return Ok(vec![game]);
        }

        if !input.is_dir() {
            bail!("Input path does not exist: {}", input.display());
        }

        let mut files = Vec::new();
        collect_json_files(input, &mut files)?;
        files.sort();
        debug!("Found {} JSON files under {}", files.len(), input.display());

        let mut matches = Vec::new();
        for path in files {
            if self.max_matches.is_some_and(|max| matches.len() >= max) {
                break;
            }
            match read_json::<Match>(&path, "match") {
                Ok(game) => matches.push(game),
                Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
            }
        }

        info!("Loaded {} matches from {}", matches.len(), input.display());
        Ok(matches)
    }
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| load_context("directory", dir))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let json = fs::read_to_string(path).with_context(|| load_context(what, path))?;
    serde_json::from_str(&json).with_context(|| {
        format!(
            "{} {}. First 200 chars: {}",
            parse_context(what),
            path.display(),
            json.chars().take(200).collect::<String>()
        )
    })
}

pub fn to_json<T: Serialize>(data: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    };
    json.context("Failed to serialize output")
}

pub fn write_json<T: Serialize>(path: &Path, data: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| save_context(path))?;
    }
    fs::write(path, to_json(data, pretty)?).with_context(|| save_context(path))?;
    info!("Saved output to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCH: &str = r#"{ "matchInfo": { "matchId": "ID" }, "players": [], "roundResults": [] }"#;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("osr_store_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_match(path: &Path, id: &str) {
        fs::write(path, MATCH.replace("ID", id)).unwrap();
    }

    #[test]
    fn test_load_single_file() {
        let dir = temp_dir("single");
        let file = dir.join("one.json");
        write_match(&file, "m1");

        let matches = MatchStore::new().load_matches(&file).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id(), "m1");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_directory_recursively_in_path_order() {
        let dir = temp_dir("recursive");
        fs::create_dir_all(dir.join("nested")).unwrap();
        write_match(&dir.join("b.json"), "second");
        write_match(&dir.join("a.json"), "first");
        write_match(&dir.join("nested").join("c.json"), "third");
        fs::write(dir.join("broken.json"), "{ not json").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let matches = MatchStore::new().load_matches(&dir).unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);

        let limited = MatchStore::with_limit(Some(2)).load_matches(&dir).unwrap();
        assert_eq!(limited.len(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let missing = std::env::temp_dir().join("osr_store_does_not_exist");
        assert!(MatchStore::new().load_matches(&missing).is_err());
    }

    #[test]
    fn test_write_then_read_json() {
        let dir = temp_dir("write");
        let path = dir.join("out").join("values.json");

        write_json(&path, &vec![1.5, 2.5], true).unwrap();
        let values: Vec<f64> = read_json(&path, "values").unwrap();
        assert_eq!(values, vec![1.5, 2.5]);

        assert!(read_json::<Vec<f64>>(&dir.join("nope.json"), "values").is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
