use std::collections::BTreeMap;

use crate::domain::{ArmorTier, Match, Puuid, Round};

use super::classify::{KillClass, classify_kill};
use super::state::{AliveState, Sides};
use super::timeline::build_timeline;

pub fn armor_bonus(armor: ArmorTier) -> u32 {
    match armor {
        ArmorTier::Light | ArmorTier::Regen => 25,
        ArmorTier::Heavy => 50,
        ArmorTier::None => 0,
    }
}

/// Damage a kill is expected to take against a victim wearing `victim_armor`
pub fn expected_kill_damage(victim_armor: ArmorTier, base_damage: u32) -> u32 {
    base_damage + armor_bonus(victim_armor)
}

/// Expected damage per killer for the round's combat kills, replayed in time
/// order without the cutoff. Once either side is wiped, later kills count
/// for nothing.
pub fn expected_round_damage(
    game: &Match,
    round: &Round,
    sides: &Sides,
    team_size: u8,
    base_damage: u32,
) -> BTreeMap<Puuid, u64> {
    let mut alive = AliveState::new(team_size);
    let mut expected: BTreeMap<Puuid, u64> = BTreeMap::new();

    for kill in build_timeline(round, None) {
        let class = classify_kill(game, sides, kill);
        let KillClass::Combat { killer, victim } = class else {
            if let Some(side) = class.victim_side() {
                alive.eliminate(side);
            }
            continue;
        };

        let wiped = alive.count(killer) == 0 || alive.count(victim) == 0;
        alive.eliminate(victim);
        if wiped {
            continue;
        }
        if let (Some(killer), Some(victim)) = (&kill.killer, &kill.victim) {
            let damage = expected_kill_damage(round.armor_of(victim), base_damage);
            *expected.entry(killer.clone()).or_default() += damage as u64;
        }
    }
    expected
}

pub fn assists_per_round(assists: u32, rounds_played: u32) -> f64 {
    if rounds_played == 0 {
        return 0.0;
    }
    assists as f64 / rounds_played as f64
}

/// Damage above what the player's kills required, per round, floored at zero
pub fn adjusted_damage_per_round(total_damage: u64, expected_damage: u64, rounds_played: u32) -> f64 {
    if rounds_played == 0 {
        return 0.0;
    }
    let surplus = total_damage as f64 - expected_damage as f64;
    (surplus / rounds_played as f64).max(0.0)
}
