use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::parse_context;

/// Economy bucket of a single player's loadout value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EconomyCategory {
    SaveRound,
    EcoRound,
    ForceBuy,
    AntiEco,
    FullBuy,
    OperatorBuy,
}

impl EconomyCategory {
    pub fn from_loadout(loadout_value: u32) -> Self {
        match loadout_value {
            0..=1500 => EconomyCategory::SaveRound,
            1501..=4000 => EconomyCategory::EcoRound,
            4001..=7500 => EconomyCategory::ForceBuy,
            7501..=10000 => EconomyCategory::AntiEco,
            10001..=15000 => EconomyCategory::FullBuy,
            _ => EconomyCategory::OperatorBuy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EconomyCategory::SaveRound => "Save Round",
            EconomyCategory::EcoRound => "Eco Round",
            EconomyCategory::ForceBuy => "Force Buy",
            EconomyCategory::AntiEco => "Anti-Eco",
            EconomyCategory::FullBuy => "Full Buy",
            EconomyCategory::OperatorBuy => "Operator Buy",
        }
    }
}

impl fmt::Display for EconomyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key of the economy table, killer category first
pub fn matchup_key(killer: EconomyCategory, victim: EconomyCategory) -> String {
    format!("{} vs {}", killer, victim)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub win_rate: f64,
}

/// Historical win rates per "{category} vs {category}" matchup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyTable {
    #[serde(default)]
    pub economy_categories: HashMap<String, MatchupStats>,
}

impl EconomyTable {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context(parse_context("economy category table"))
    }

    pub fn is_empty(&self) -> bool {
        self.economy_categories.is_empty()
    }

    pub fn win_rate(&self, killer: EconomyCategory, victim: EconomyCategory) -> Option<f64> {
        self.economy_categories
            .get(&matchup_key(killer, victim))
            .map(|m| m.win_rate)
    }

    /// `2 × (1 − w)`: neutral at w = 0.5, above 1 for kills against economic odds
    pub fn modifier(&self, killer_loadout: u32, victim_loadout: u32, default_win_rate: f64) -> f64 {
        let killer = EconomyCategory::from_loadout(killer_loadout);
        let victim = EconomyCategory::from_loadout(victim_loadout);
        let win_rate = self
            .win_rate(killer, victim)
            .unwrap_or(default_win_rate)
            .clamp(0.0, 1.0);
        2.0 * (1.0 - win_rate)
    }
}
