use crate::domain::{Kill, Match};

use super::state::{Side, Sides};

/// How a lethal event relates to the two sides of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillClass {
    /// A player killed an enemy
    Combat { killer: Side, victim: Side },
    /// Death not caused by a player (spike explosion)
    NonCombat { victim: Option<Side> },
    /// Killer and victim play the same side
    FriendlyFire { side: Side },
    /// Killer or victim cannot be placed on a side
    Unattributed { victim: Option<Side> },
}

impl KillClass {
    pub fn victim_side(&self) -> Option<Side> {
        match *self {
            KillClass::Combat { victim, .. } => Some(victim),
            KillClass::NonCombat { victim } => victim,
            KillClass::FriendlyFire { side } => Some(side),
            KillClass::Unattributed { victim } => victim,
        }
    }
}

pub fn classify_kill(game: &Match, sides: &Sides, kill: &Kill) -> KillClass {
    let victim = side_of_player(game, sides, kill.victim.as_deref());

    if kill.is_non_combat() {
        return KillClass::NonCombat { victim };
    }

    let killer = side_of_player(game, sides, kill.killer.as_deref());

    match (killer, victim) {
        (Some(killer), Some(victim)) if killer == victim => KillClass::FriendlyFire { side: victim },
        (Some(killer), Some(victim)) => KillClass::Combat { killer, victim },
        _ => KillClass::Unattributed { victim },
    }
}

fn side_of_player(game: &Match, sides: &Sides, puuid: Option<&str>) -> Option<Side> {
    puuid
        .and_then(|p| game.team_of(p))
        .and_then(|team| sides.side_of(team))
}
