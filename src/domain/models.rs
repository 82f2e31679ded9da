use serde::{Deserialize, Serialize};

pub type Puuid = String;
pub type TeamId = String;

/// One played game as recorded in the match-replay log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "matchInfo")]
    pub match_info: MatchInfo,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(rename = "roundResults", default)]
    pub rounds: Vec<Round>,
}

impl Match {
    pub fn id(&self) -> &str {
        &self.match_info.match_id
    }

    /// Players taking part in the match (observers excluded)
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_observer)
    }

    pub fn player(&self, puuid: &str) -> Option<&Player> {
        self.active_players().find(|p| p.puuid == puuid)
    }

    pub fn team_of(&self, puuid: &str) -> Option<&str> {
        self.player(puuid).map(|p| p.team_id.as_str())
    }

    /// Distinct team labels in roster order
    pub fn team_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for player in self.active_players() {
            if !labels.contains(&player.team_id.as_str()) {
                labels.push(player.team_id.as_str());
            }
        }
        labels
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInfo {
    #[serde(rename = "matchId")]
    pub match_id: String,
    #[serde(rename = "mapId", default)]
    pub map_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub puuid: Puuid,
    #[serde(rename = "gameName", default)]
    pub game_name: String,
    #[serde(rename = "tagLine", default)]
    pub tag_line: String,
    #[serde(rename = "teamId")]
    pub team_id: TeamId,
    #[serde(rename = "isObserver", default)]
    pub is_observer: bool,
    #[serde(default)]
    pub stats: Option<PlayerStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(rename = "roundsPlayed", default)]
    pub rounds_played: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResultCode {
    Elimination,
    Defuse,
    Detonate,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    #[serde(rename = "roundNum")]
    pub number: u32,
    #[serde(rename = "roundResult", default)]
    pub result: Option<String>,
    #[serde(rename = "roundResultCode", default)]
    pub result_code: RoundResultCode,
    #[serde(rename = "winningTeam", default)]
    pub winning_team: Option<TeamId>,
    #[serde(rename = "bombPlanter", default)]
    pub bomb_planter: Option<Puuid>,
    #[serde(rename = "plantRoundTime", default)]
    pub plant_time_ms: Option<u64>,
    #[serde(rename = "defuseRoundTime", default)]
    pub defuse_time_ms: Option<u64>,
    #[serde(rename = "playerStats", default)]
    pub player_stats: Vec<PlayerRoundStat>,
}

impl Round {
    pub fn spike_planted(&self) -> bool {
        self.plant_time_ms.is_some()
    }

    /// All kills in record order: per-player stats in order, then each player's kills
    pub fn kills(&self) -> impl Iterator<Item = &Kill> {
        self.player_stats.iter().flat_map(|s| s.kills.iter())
    }

    pub fn stat_for(&self, puuid: &str) -> Option<&PlayerRoundStat> {
        self.player_stats.iter().find(|s| s.puuid == puuid)
    }

    pub fn loadout_of(&self, puuid: &str) -> u32 {
        self.stat_for(puuid)
            .map(|s| s.economy.loadout_value)
            .unwrap_or(0)
    }

    pub fn armor_of(&self, puuid: &str) -> ArmorTier {
        self.stat_for(puuid)
            .map(|s| s.economy.armor_tier())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRoundStat {
    pub puuid: Puuid,
    #[serde(default)]
    pub kills: Vec<Kill>,
    #[serde(default)]
    pub damage: Vec<DamageEvent>,
    #[serde(default)]
    pub economy: Economy,
}

impl PlayerRoundStat {
    pub fn total_damage(&self) -> u64 {
        self.damage.iter().map(|d| d.damage as u64).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Economy {
    #[serde(rename = "loadoutValue", default)]
    pub loadout_value: u32,
    #[serde(default)]
    pub armor: Option<ArmorTier>,
}

impl Economy {
    pub fn armor_tier(&self) -> ArmorTier {
        self.armor.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorTier {
    Light,
    Heavy,
    Regen,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kill {
    #[serde(rename = "timeSinceRoundStartMillis", default)]
    pub time_ms: u64,
    #[serde(default)]
    pub killer: Option<Puuid>,
    #[serde(default)]
    pub victim: Option<Puuid>,
    #[serde(default)]
    pub assistants: Vec<Puuid>,
    #[serde(rename = "finishingDamage", default)]
    pub finishing_damage: Option<FinishingDamage>,
}

impl Kill {
    /// Deaths not caused by another player, such as the spike explosion
    pub fn is_non_combat(&self) -> bool {
        self.finishing_damage
            .as_ref()
            .and_then(|d| d.damage_type.as_deref())
            == Some("Bomb")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishingDamage {
    #[serde(rename = "damageType", default)]
    pub damage_type: Option<String>,
    #[serde(rename = "damageItem", default)]
    pub damage_item: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageEvent {
    #[serde(default)]
    pub receiver: Option<Puuid>,
    #[serde(default)]
    pub damage: u32,
}
