use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use crate::components::{Component, ComponentWeights};
use crate::errors::{RatingError, load_context};
use crate::rating::NormalizationParams;
use crate::storage::read_json;
use crate::tables::{EconomyTable, LookupTables, WinProbabilityTable};

pub const DATA_DIR_ENV: &str = "OSR_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const WIN_TABLE_FILE: &str = "xvx_data.json";
pub const ECONOMY_TABLE_FILE: &str = "loadout_cost_analysis.json";
pub const WEIGHTS_FILE: &str = "weights.json";
pub const NORMALIZATION_FILE: &str = "normalization_params.json";

const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Directory holding the default tables and rating parameters
pub fn data_dir() -> PathBuf {
    resolve_data_dir(env::var(DATA_DIR_ENV).ok())
}

fn resolve_data_dir(value: Option<String>) -> PathBuf {
    value
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Weights are stored either positionally, in component order, or by name
#[derive(Deserialize)]
#[serde(untagged)]
enum WeightsFile {
    List(Vec<f64>),
    Named(BTreeMap<String, f64>),
}

pub fn parse_weights(json: &str) -> Result<ComponentWeights> {
    let file: WeightsFile = serde_json::from_str(json).context("Weights must be a list or an object")?;
    let weights = match file {
        WeightsFile::List(values) => weights_from_list(&values)?,
        WeightsFile::Named(named) => weights_from_names(&named)?,
    };
    validate_weights(&weights)?;
    Ok(weights)
}

fn weights_from_list(values: &[f64]) -> Result<ComponentWeights, RatingError> {
    if values.len() != Component::ALL.len() {
        return Err(RatingError::InvalidWeights(format!(
            "expected {} values ({}), got {}",
            Component::ALL.len(),
            Component::available_names(),
            values.len()
        )));
    }
    Ok(ComponentWeights::from_map(
        Component::ALL.iter().copied().zip(values.iter().copied()).collect(),
    ))
}

fn weights_from_names(named: &BTreeMap<String, f64>) -> Result<ComponentWeights, RatingError> {
    let mut weights = BTreeMap::new();
    for (name, &value) in named {
        weights.insert(name.parse::<Component>()?, value);
    }
    Ok(ComponentWeights::from_map(weights))
}

/// Every weight in [0, 1] and the total within 1 ± 0.01
pub fn validate_weights(weights: &ComponentWeights) -> Result<(), RatingError> {
    for (component, weight) in weights.iter() {
        if !(0.0..=1.0).contains(&weight) {
            return Err(RatingError::InvalidWeights(format!(
                "{} weight {} is outside [0, 1]",
                component, weight
            )));
        }
    }

    let total = weights.total();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(RatingError::InvalidWeights(format!(
            "weights sum to {:.4}, expected 1.0",
            total
        )));
    }
    Ok(())
}

pub fn load_weights(path: &Path) -> Result<ComponentWeights> {
    let json = fs::read_to_string(path).with_context(|| load_context("weights", path))?;
    parse_weights(&json).with_context(|| load_context("weights", path))
}

pub fn load_normalization(path: &Path) -> Result<NormalizationParams> {
    read_json(path, "normalization parameters")
}

pub fn load_win_table(path: &Path) -> Result<WinProbabilityTable> {
    let json = fs::read_to_string(path).with_context(|| load_context("win probability table", path))?;
    WinProbabilityTable::from_json(&json).with_context(|| load_context("win probability table", path))
}

pub fn load_economy_table(path: &Path) -> Result<EconomyTable> {
    let json = fs::read_to_string(path).with_context(|| load_context("economy table", path))?;
    EconomyTable::from_json(&json).with_context(|| load_context("economy table", path))
}

/// An explicit path must load. Without one, the default file in `data_dir`
/// is used when present and `None` is returned when it is not.
pub fn load_or_default<T>(
    explicit: Option<&Path>,
    data_dir: &Path,
    file_name: &str,
    what: &str,
    load: impl Fn(&Path) -> Result<T>,
) -> Result<Option<T>> {
    if let Some(path) = explicit {
        info!("Loading {} from {}", what, path.display());
        return load(path).map(Some);
    }

    let path = data_dir.join(file_name);
    if !path.exists() {
        warn!("No {} at {}, using defaults", what, path.display());
        return Ok(None);
    }

    info!("Loading {} from {}", what, path.display());
    load(&path).map(Some)
}

pub fn load_tables(
    win_table: Option<&Path>,
    economy_table: Option<&Path>,
    data_dir: &Path,
) -> Result<LookupTables> {
    let win_probability = load_or_default(
        win_table,
        data_dir,
        WIN_TABLE_FILE,
        "win probability table",
        load_win_table,
    )?
    .unwrap_or_default();

    let economy = load_or_default(
        economy_table,
        data_dir,
        ECONOMY_TABLE_FILE,
        "economy table",
        load_economy_table,
    )?
    .unwrap_or_default();

    if win_probability.is_empty() {
        warn!("Win probability table is empty, every state resolves to the default probability");
    }

    Ok(LookupTables::new(win_probability, economy))
}
