use std::collections::BTreeMap;

use log::{debug, warn};

use crate::components::{
    ComponentMap, ComponentRegistry, ComponentValues, PlayerMatchKey, compute,
};
use crate::domain::{Match, Puuid};

use super::impact::{ImpactEngine, RoundImpact};
use super::metrics::expected_round_damage;

/// Match-level sums for one player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTotals {
    pub kill_contrib: f64,
    pub death_contrib: f64,
    pub total_damage: u64,
    pub expected_damage: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub match_id: String,
    pub rounds: Vec<RoundImpact>,
    players: BTreeMap<Puuid, PlayerTotals>,
}

impl MatchSummary {
    pub fn empty(match_id: &str) -> Self {
        Self {
            match_id: match_id.to_string(),
            rounds: Vec::new(),
            players: BTreeMap::new(),
        }
    }

    /// Players that never appear in the match get all-zero totals
    pub fn totals_for(&self, puuid: &str) -> PlayerTotals {
        self.players.get(puuid).cloned().unwrap_or_default()
    }

    pub fn players(&self) -> impl Iterator<Item = (&Puuid, &PlayerTotals)> {
        self.players.iter()
    }
}

pub fn summarize_match(engine: &ImpactEngine, game: &Match) -> MatchSummary {
    let rounds = engine.simulate_match(game);
    let base_damage = engine.settings().base_kill_damage;
    let team_size = engine.settings().team_size;

    let mut players: BTreeMap<Puuid, PlayerTotals> = game
        .active_players()
        .map(|p| (p.puuid.clone(), PlayerTotals::default()))
        .collect();

    for (round, impact) in game.rounds.iter().zip(&rounds) {
        for event in impact.events.iter().filter(|e| e.is_scored()) {
            if let Some(killer) = &event.killer {
                players.entry(killer.clone()).or_default().kill_contrib += event.impact();
            }
            if let Some(victim) = &event.victim {
                players.entry(victim.clone()).or_default().death_contrib -= event.impact();
            }
        }

        for stat in &round.player_stats {
            players.entry(stat.puuid.clone()).or_default().total_damage += stat.total_damage();
        }
        let expected = expected_round_damage(game, round, &impact.sides, team_size, base_damage);
        for (killer, damage) in expected {
            players.entry(killer).or_default().expected_damage += damage;
        }
    }

    MatchSummary {
        match_id: game.id().to_string(),
        rounds,
        players,
    }
}

/// Component values for every active player of the match.
/// A component that fails for one player is logged and recorded as 0.0.
pub fn compute_components(
    engine: &ImpactEngine,
    game: &Match,
    registry: &ComponentRegistry,
) -> ComponentMap {
    let summary = summarize_match(engine, game);
    let mut map = ComponentMap::new();

    for player in game.active_players() {
        let mut values = ComponentValues::new();
        for component in registry.iter() {
            let value = match compute(component, player, &summary) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Match {}: {} for {} failed: {}", game.id(), component, player.puuid, e);
                    0.0
                }
            };
            values.insert(component, value);
        }
        map.insert(PlayerMatchKey::new(&player.puuid, game.id()), values);
    }

    debug!("Match {}: components computed for {} players", game.id(), map.len());
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::config::settings::EngineSettings;
    use crate::domain::{ArmorTier, PlayerStats, RoundResultCode};
    use crate::engine::fixtures::{
        MatchBuilder, add_damage, add_kill, approx_eq, kill, round, set_economy,
    };
    use crate::tables::{EconomyTable, LookupTables, WinProbabilityTable};

    const BLUE: [&str; 5] = ["b1", "b2", "b3", "b4", "b5"];
    const RED: [&str; 5] = ["r1", "r2", "r3", "r4", "r5"];

    fn tables() -> LookupTables {
        let mut win = WinProbabilityTable::default();
        win.atk_no_spike.insert("5v0".to_string(), 1.0);
        win.atk_no_spike.insert("5v1".to_string(), 0.8);
        LookupTables::new(win, EconomyTable::default())
    }

    fn two_round_match() -> Match {
        let mut ace = round(RoundResultCode::Elimination, Some("Blue"));
        for (i, victim) in RED.iter().enumerate() {
            add_kill(&mut ace, kill("b1", victim, 10_000 * (i as u64 + 1)));
            add_damage(&mut ace, "b1", victim, 150);
        }
        set_economy(&mut ace, "r1", 3_900, ArmorTier::Heavy);

        let mut game = MatchBuilder::new("m1")
            .team("Blue", &BLUE)
            .team("Red", &RED)
            .round(ace)
            .round(round(RoundResultCode::Other, Some("Red")))
            .build();
        for player in &mut game.players {
            player.stats = Some(PlayerStats {
                kills: 0,
                deaths: 0,
                assists: 1,
                rounds_played: 2,
            });
        }
        game
    }

    #[test]
    fn test_match_components_end_to_end() {
        let tables = tables();
        let settings = EngineSettings::default();
        let engine = ImpactEngine::new(&tables, &settings);
        let game = two_round_match();

        let map = compute_components(&engine, &game, &ComponentRegistry::builtin());
        assert_eq!(map.len(), 10);

        let ace = map.get(&PlayerMatchKey::new("b1", "m1")).unwrap();
        assert!(approx_eq(ace.get(Component::KillContrib).unwrap(), 0.5));
        assert_eq!(ace.get(Component::DeathContrib), Some(0.0));
        assert_eq!(ace.get(Component::Apr), Some(0.5));
        // 750 dealt, 150 + 4 × 100 expected, over 2 rounds
        assert_eq!(ace.get(Component::Adra), Some(100.0));

        let last_victim = map.get(&PlayerMatchKey::new("r5", "m1")).unwrap();
        assert!(approx_eq(last_victim.get(Component::DeathContrib).unwrap(), -0.2));
        assert_eq!(last_victim.get(Component::KillContrib), Some(0.0));
    }

    #[test]
    fn test_missing_stats_are_isolated_per_component() {
        let tables = tables();
        let settings = EngineSettings::default();
        let engine = ImpactEngine::new(&tables, &settings);
        let mut game = two_round_match();
        game.players[0].stats = None;

        let map = compute_components(&engine, &game, &ComponentRegistry::builtin());
        let ace = map.get(&PlayerMatchKey::new("b1", "m1")).unwrap();

        assert_eq!(ace.get(Component::Apr), Some(0.0));
        assert_eq!(ace.get(Component::Adra), Some(0.0));
        assert!(approx_eq(ace.get(Component::KillContrib).unwrap(), 0.5));
    }

    #[test]
    fn test_observers_are_skipped() {
        let tables = tables();
        let settings = EngineSettings::default();
        let engine = ImpactEngine::new(&tables, &settings);
        let mut game = two_round_match();
        game.players[9].is_observer = true;

        let registry = ComponentRegistry::select(&["APR"]).unwrap();
        let map = compute_components(&engine, &game, &registry);

        assert_eq!(map.len(), 9);
        assert!(!map.contains_key(&PlayerMatchKey::new("r5", "m1")));
        assert!(map.values().all(|v| v.len() == 1));
    }

    #[test]
    fn test_components_are_bit_identical_across_runs() {
        let tables = tables();
        let settings = EngineSettings::default();
        let engine = ImpactEngine::new(&tables, &settings);
        let game = two_round_match();
        let registry = ComponentRegistry::builtin();

        let bits = |map: &ComponentMap| -> Vec<(PlayerMatchKey, Component, u64)> {
            map.iter()
                .flat_map(|(key, values)| {
                    values
                        .iter()
                        .map(move |(component, value)| (key.clone(), component, value.to_bits()))
                })
                .collect()
        };

        let first = compute_components(&engine, &game, &registry);
        let second = compute_components(&engine, &game, &registry);
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first.len(), 10);
    }

    #[test]
    fn test_summary_totals() {
        let tables = tables();
        let settings = EngineSettings::default();
        let engine = ImpactEngine::new(&tables, &settings);
        let summary = summarize_match(&engine, &two_round_match());

        let totals = summary.totals_for("b1");
        assert_eq!(totals.total_damage, 750);
        assert_eq!(totals.expected_damage, 550);
        assert_eq!(summary.rounds.len(), 2);
        assert_eq!(summary.totals_for("nobody"), PlayerTotals::default());
    }
}
