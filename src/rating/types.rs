use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::components::{Component, ComponentValues};
use crate::domain::Player;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreParams {
    pub mean: f64,
    pub std: f64,
}

impl ZScoreParams {
    /// A zero spread would divide by zero, use 1 instead
    pub fn spread(&self) -> f64 {
        if self.std == 0.0 { 1.0 } else { self.std }
    }

    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean) / self.spread()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalRatingParams {
    #[serde(default = "one")]
    pub scaling_factor: f64,
    #[serde(default)]
    pub base_rating: f64,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "one")]
    pub std: f64,
}

fn one() -> f64 {
    1.0
}

impl Default for FinalRatingParams {
    fn default() -> Self {
        Self {
            scaling_factor: 1.0,
            base_rating: 0.0,
            mean: 0.0,
            std: 1.0,
        }
    }
}

/// Per-component z-score parameters plus the final rating transform.
/// Serialized as `{ "KillContrib": {mean, std}, ..., "final_rating": {...} }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    #[serde(default)]
    pub final_rating: FinalRatingParams,
    #[serde(flatten)]
    pub components: BTreeMap<String, ZScoreParams>,
}

impl NormalizationParams {
    pub fn get(&self, component: Component) -> Option<ZScoreParams> {
        self.components.get(component.name()).copied()
    }

    pub fn set(&mut self, component: Component, params: ZScoreParams) {
        self.components.insert(component.name().to_string(), params);
    }

    pub fn missing(&self, components: impl IntoIterator<Item = Component>) -> Vec<Component> {
        components
            .into_iter()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub team_id: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub rounds_played: u32,
}

impl From<&Player> for PlayerInfo {
    fn from(player: &Player) -> Self {
        let stats = player.stats.clone().unwrap_or_default();
        Self {
            puuid: player.puuid.clone(),
            game_name: player.game_name.clone(),
            tag_line: player.tag_line.clone(),
            team_id: player.team_id.clone(),
            kills: stats.kills,
            deaths: stats.deaths,
            assists: stats.assists,
            rounds_played: stats.rounds_played,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub match_id: String,
    pub player: PlayerInfo,
    pub rating: f64,
    pub components: ComponentValues,
    pub normalized_components: ComponentValues,
    pub weighted_components: ComponentValues,
    pub weighted_sum: f64,
    pub pre_normalized_rating: f64,
    pub scaling_factor: f64,
    pub base_rating: f64,
    pub calculated_at: DateTime<Utc>,
}

impl PlayerRating {
    pub fn display_name(&self) -> String {
        if self.player.game_name.is_empty() {
            return self.player.puuid.clone();
        }
        format!("{}#{}", self.player.game_name, self.player.tag_line)
    }
}
