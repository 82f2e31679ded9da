//! Builders for hand-written matches used across the engine tests

use crate::domain::{
    ArmorTier, DamageEvent, Economy, FinishingDamage, Kill, Match, MatchInfo, Player,
    PlayerRoundStat, PlayerStats, Round, RoundResultCode,
};

pub struct MatchBuilder {
    game: Match,
}

impl MatchBuilder {
    pub fn new(match_id: &str) -> Self {
        Self {
            game: Match {
                match_info: MatchInfo {
                    match_id: match_id.to_string(),
                    map_id: None,
                },
                players: Vec::new(),
                rounds: Vec::new(),
            },
        }
    }

    pub fn team(mut self, team: &str, puuids: &[&str]) -> Self {
        for puuid in puuids {
            self.game.players.push(player(puuid, team));
        }
        self
    }

    /// Appends the round, numbering it by position
    pub fn round(mut self, mut round: Round) -> Self {
        round.number = self.game.rounds.len() as u32;
        self.game.rounds.push(round);
        self
    }

    pub fn build(self) -> Match {
        self.game
    }
}

pub fn player(puuid: &str, team: &str) -> Player {
    Player {
        puuid: puuid.to_string(),
        game_name: puuid.to_uppercase(),
        tag_line: "TEST".to_string(),
        team_id: team.to_string(),
        is_observer: false,
        stats: Some(PlayerStats::default()),
    }
}

pub fn round(code: RoundResultCode, winner: Option<&str>) -> Round {
    Round {
        number: 0,
        result: None,
        result_code: code,
        winning_team: winner.map(str::to_string),
        bomb_planter: None,
        plant_time_ms: None,
        defuse_time_ms: None,
        player_stats: Vec::new(),
    }
}

pub fn kill(killer: &str, victim: &str, time_ms: u64) -> Kill {
    Kill {
        time_ms,
        killer: Some(killer.to_string()),
        victim: Some(victim.to_string()),
        assistants: Vec::new(),
        finishing_damage: Some(FinishingDamage {
            damage_type: Some("Weapon".to_string()),
            damage_item: None,
        }),
    }
}

pub fn bomb_kill(victim: &str, time_ms: u64) -> Kill {
    Kill {
        time_ms,
        killer: Some(victim.to_string()),
        victim: Some(victim.to_string()),
        assistants: Vec::new(),
        finishing_damage: Some(FinishingDamage {
            damage_type: Some("Bomb".to_string()),
            damage_item: None,
        }),
    }
}

pub fn stat_mut<'a>(round: &'a mut Round, puuid: &str) -> &'a mut PlayerRoundStat {
    if let Some(idx) = round.player_stats.iter().position(|s| s.puuid == puuid) {
        return &mut round.player_stats[idx];
    }
    round.player_stats.push(PlayerRoundStat {
        puuid: puuid.to_string(),
        kills: Vec::new(),
        damage: Vec::new(),
        economy: Economy::default(),
    });
    let last = round.player_stats.len() - 1;
    &mut round.player_stats[last]
}

/// Records the kill under its killer's round stats
pub fn add_kill(round: &mut Round, kill: Kill) {
    let owner = kill.killer.clone().or_else(|| kill.victim.clone()).unwrap_or_default();
    stat_mut(round, &owner).kills.push(kill);
}

pub fn set_economy(round: &mut Round, puuid: &str, loadout_value: u32, armor: ArmorTier) {
    stat_mut(round, puuid).economy = Economy {
        loadout_value,
        armor: Some(armor),
    };
}

pub fn add_damage(round: &mut Round, dealer: &str, receiver: &str, damage: u32) {
    stat_mut(round, dealer).damage.push(DamageEvent {
        receiver: Some(receiver.to_string()),
        damage,
    });
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
