use log::debug;

use crate::domain::Player;
use crate::engine::{MatchSummary, metrics};
use crate::errors::RatingError;

use super::types::Component;

/// The set of components a run computes, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRegistry {
    components: Vec<Component>,
}

impl ComponentRegistry {
    pub fn builtin() -> Self {
        Self {
            components: Component::ALL.to_vec(),
        }
    }

    /// Restrict the registry to the named components. An empty selection keeps all of them.
    pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Self, RatingError> {
        if names.is_empty() {
            return Ok(Self::builtin());
        }

        let mut components = Vec::new();
        for name in names {
            let component: Component = name.as_ref().parse()?;
            if !components.contains(&component) {
                components.push(component);
            }
        }
        components.sort();

        debug!("Selected components: {:?}", components);
        Ok(Self { components })
    }

    pub fn list(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn contains(&self, component: Component) -> bool {
        self.components.contains(&component)
    }

    pub fn iter(&self) -> impl Iterator<Item = Component> + '_ {
        self.components.iter().copied()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compute one component for one player from the simulated match
pub fn compute(
    component: Component,
    player: &Player,
    summary: &MatchSummary,
) -> Result<f64, RatingError> {
    let totals = summary.totals_for(&player.puuid);

    let value = match component {
        Component::KillContrib => totals.kill_contrib,
        Component::DeathContrib => totals.death_contrib,
        Component::Apr => {
            let stats = require_stats(component, player)?;
            metrics::assists_per_round(stats.assists, stats.rounds_played)
        }
        Component::Adra => {
            let stats = require_stats(component, player)?;
            metrics::adjusted_damage_per_round(
                totals.total_damage,
                totals.expected_damage,
                stats.rounds_played,
            )
        }
    };

    if !value.is_finite() {
        return Err(RatingError::NonFinite {
            puuid: player.puuid.clone(),
            component: component.name().to_string(),
        });
    }

    Ok(value)
}

fn require_stats(
    component: Component,
    player: &Player,
) -> Result<&crate::domain::PlayerStats, RatingError> {
    player.stats.as_ref().ok_or_else(|| RatingError::MissingStats {
        puuid: player.puuid.clone(),
        component: component.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lists_all_components() {
        let registry = ComponentRegistry::builtin();
        assert_eq!(registry.list(), vec!["KillContrib", "DeathContrib", "APR", "ADRa"]);
    }

    #[test]
    fn test_select_subset_keeps_canonical_order() {
        let registry = ComponentRegistry::select(&["ADRa", "KillContrib", "ADRa"]).unwrap();
        assert_eq!(registry.list(), vec!["KillContrib", "ADRa"]);
        assert!(!registry.contains(Component::Apr));
    }

    #[test]
    fn test_select_empty_means_all() {
        let names: [&str; 0] = [];
        assert_eq!(ComponentRegistry::select(&names).unwrap(), ComponentRegistry::builtin());
    }

    #[test]
    fn test_select_unknown_fails() {
        assert!(matches!(
            ComponentRegistry::select(&["KAST"]),
            Err(RatingError::UnknownComponent { .. })
        ));
    }

    #[test]
    fn test_missing_stats_is_reported() {
        let player: Player =
            serde_json::from_str(r#"{ "puuid": "a", "teamId": "Red" }"#).unwrap();
        let summary = MatchSummary::empty("m");

        assert_eq!(compute(Component::KillContrib, &player, &summary), Ok(0.0));
        assert!(matches!(
            compute(Component::Apr, &player, &summary),
            Err(RatingError::MissingStats { .. })
        ));
    }
}
