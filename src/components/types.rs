use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RatingError;

/// The closed set of per-player, per-match rating components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Component {
    KillContrib,
    DeathContrib,
    #[serde(rename = "APR")]
    Apr,
    #[serde(rename = "ADRa")]
    Adra,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::KillContrib,
        Component::DeathContrib,
        Component::Apr,
        Component::Adra,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Component::KillContrib => "KillContrib",
            Component::DeathContrib => "DeathContrib",
            Component::Apr => "APR",
            Component::Adra => "ADRa",
        }
    }

    pub fn available_names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RatingError::UnknownComponent {
                name: s.to_string(),
                available: Self::available_names(),
            })
    }
}

/// Identity of one player in one match
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerMatchKey {
    pub puuid: String,
    pub match_id: String,
}

impl PlayerMatchKey {
    pub fn new(puuid: &str, match_id: &str) -> Self {
        Self {
            puuid: puuid.to_string(),
            match_id: match_id.to_string(),
        }
    }
}

impl fmt::Display for PlayerMatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.puuid, self.match_id)
    }
}

/// Component values computed for one player-match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentValues(BTreeMap<Component, f64>);

impl ComponentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: Component, value: f64) {
        self.0.insert(component, value);
    }

    pub fn get(&self, component: Component) -> Option<f64> {
        self.0.get(&component).copied()
    }

    pub fn contains(&self, component: Component) -> bool {
        self.0.contains_key(&component)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        self.0.iter().map(|(&c, &v)| (c, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub type ComponentMap = BTreeMap<PlayerMatchKey, ComponentValues>;

/// Weight of each component in the final rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentWeights(BTreeMap<Component, f64>);

impl ComponentWeights {
    pub fn from_map(weights: BTreeMap<Component, f64>) -> Self {
        Self(weights)
    }

    pub fn get(&self, component: Component) -> Option<f64> {
        self.0.get(&component).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        self.0.iter().map(|(&c, &w)| (c, w))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        let share = 1.0 / Component::ALL.len() as f64;
        Self(Component::ALL.iter().map(|&c| (c, share)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_names_round_trip() {
        for component in Component::ALL {
            assert_eq!(component.name().parse::<Component>().unwrap(), component);
        }
        assert_eq!("adra".parse::<Component>().unwrap(), Component::Adra);
    }

    #[test]
    fn test_unknown_component_lists_available() {
        let err = "HS%".parse::<Component>().unwrap_err();
        assert!(err.to_string().contains("KillContrib, DeathContrib, APR, ADRa"));
    }

    #[test]
    fn test_values_serialize_with_component_names() {
        let mut values = ComponentValues::new();
        values.insert(Component::Apr, 0.25);
        values.insert(Component::KillContrib, 1.5);

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"KillContrib":1.5,"APR":0.25}"#);
    }

    #[test]
    fn test_player_match_key_display() {
        let key = PlayerMatchKey::new("p1", "m1");
        assert_eq!(key.to_string(), "p1_m1");
    }

    #[test]
    fn test_default_weights_are_uniform() {
        let weights = ComponentWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-12);
        assert_eq!(weights.get(Component::Adra), Some(0.25));
    }
}
