use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use serde::Serialize;

use crate::components::{Component, ComponentMap, ComponentRegistry, PlayerMatchKey};
use crate::config::settings::AppConfig;
use crate::domain::{Match, validate_match};
use crate::engine::{ImpactEngine, compute_components};
use crate::rating::{NormalizationParams, PlayerInfo, PlayerRating, RatingCalculator, fit_normalization};
use crate::storage::{MatchStore, to_json, write_json};
use crate::tables::LookupTables;

use super::report::print_summary;

pub type RatingMap = BTreeMap<PlayerMatchKey, PlayerRating>;

/// Load → validate → simulate → rate pipeline behind every subcommand
pub struct RatingService {
    config: AppConfig,
    tables: LookupTables,
    registry: ComponentRegistry,
    store: MatchStore,
}

impl RatingService {
    pub fn new(config: AppConfig, tables: LookupTables, registry: ComponentRegistry) -> Self {
        Self {
            config,
            tables,
            registry,
            store: MatchStore::new(),
        }
    }

    pub fn with_store(mut self, store: MatchStore) -> Self {
        self.store = store;
        self
    }

    pub fn run_calculate(&self, input: &Path, output: Option<&Path>, pretty: bool) -> Result<()> {
        info!("=== Starting Rating Calculation ===\n");

        let matches = self.load_matches(input)?;
        let ratings = self.calculate_ratings(&matches);
        info!("  → Rated {} player-matches\n", ratings.len());

        let components: Vec<Component> = self.registry.iter().collect();
        match output {
            Some(path) => {
                write_json(path, &keyed(&ratings), pretty)?;
                let rows: Vec<&PlayerRating> = ratings.values().collect();
                print_summary(&rows, &components);
            }
            None => println!("{}", to_json(&keyed(&ratings), pretty)?),
        }

        info!("=== Rating Calculation Complete ===");
        Ok(())
    }

    pub fn run_components(&self, input: &Path, output: Option<&Path>, pretty: bool) -> Result<()> {
        info!("=== Starting Component Extraction ===\n");

        let matches = self.load_matches(input)?;
        let components = self.compute_components(&matches);
        info!("  → Computed components for {} player-matches\n", components.len());

        emit(&keyed(&components), output, pretty)?;

        info!("=== Component Extraction Complete ===");
        Ok(())
    }

    pub fn run_fit(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        info!("=== Starting Normalization Fit ===\n");

        let matches = self.load_matches(input)?;
        let params = self.fit(&matches);
        info!(
            "  → Final rating: mean {:.4}, std {:.4}\n",
            params.final_rating.mean, params.final_rating.std
        );

        emit(&params, output, true)?;

        info!("=== Normalization Fit Complete ===");
        Ok(())
    }

    /// Matches that fail validation are logged and dropped
    pub fn load_matches(&self, input: &Path) -> Result<Vec<Match>> {
        let loaded = self.store.load_matches(input)?;
        let total = loaded.len();

        let matches: Vec<Match> = loaded
            .into_iter()
            .filter(|game| match validate_match(game) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Skipping match: {}", e);
                    false
                }
            })
            .collect();

        info!("  → {} of {} matches passed validation", matches.len(), total);
        Ok(matches)
    }

    pub fn compute_components(&self, matches: &[Match]) -> ComponentMap {
        let engine = ImpactEngine::new(&self.tables, &self.config.engine);
        let mut map = ComponentMap::new();

        for (idx, game) in matches.iter().enumerate() {
            if (idx + 1) % 100 == 0 || idx + 1 == matches.len() {
                info!("  Processing match {}/{}", idx + 1, matches.len());
            }
            map.extend(compute_components(&engine, game, &self.registry));
        }
        map
    }

    pub fn calculate_ratings(&self, matches: &[Match]) -> RatingMap {
        let rating_settings = &self.config.rating;
        let missing = rating_settings.normalization.missing(self.registry.iter());
        if !missing.is_empty() {
            warn!(
                "No normalization parameters for {:?}, leaving them out of the rating",
                missing.iter().map(|c| c.name()).collect::<Vec<_>>()
            );
        }

        let calculator = RatingCalculator::new(rating_settings);
        let components = self.compute_components(matches);
        let calculated_at = Utc::now();
        let mut ratings = RatingMap::new();

        for game in matches {
            for player in game.active_players() {
                let key = PlayerMatchKey::new(&player.puuid, game.id());
                let Some(values) = components.get(&key) else {
                    continue;
                };
                let rating = calculator.rate(
                    game.id(),
                    PlayerInfo::from(player),
                    values.clone(),
                    calculated_at,
                );
                ratings.insert(key, rating);
            }
        }
        ratings
    }

    pub fn fit(&self, matches: &[Match]) -> NormalizationParams {
        let components = self.compute_components(matches);
        fit_normalization(&components, &self.config.rating.weights)
    }
}

/// Output maps are keyed "{puuid}_{matchId}"
fn keyed<T>(map: &BTreeMap<PlayerMatchKey, T>) -> BTreeMap<String, &T> {
    map.iter().map(|(key, value)| (key.to_string(), value)).collect()
}

fn emit<T: Serialize>(data: &T, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => write_json(path, data, pretty),
        None => {
            println!("{}", to_json(data, pretty)?);
            Ok(())
        }
    }
}
