use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::state::{Side, XvX};
use crate::errors::parse_context;

/// Precomputed round win probabilities keyed by "AvB", from the attacking side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinProbabilityTable {
    #[serde(default)]
    pub atk_spike: HashMap<String, f64>,
    #[serde(default)]
    pub atk_no_spike: HashMap<String, f64>,
    #[serde(default)]
    pub def_spike: HashMap<String, f64>,
    #[serde(default)]
    pub def_no_spike: HashMap<String, f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableFile {
    Wrapped {
        win_probabilities: WinProbabilityTable,
    },
    Bare(WinProbabilityTable),
}

impl WinProbabilityTable {
    /// Accepts the tables either at the top level or under `win_probabilities`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: TableFile =
            serde_json::from_str(json).context(parse_context("win probability table"))?;
        Ok(match file {
            TableFile::Wrapped { win_probabilities } => win_probabilities,
            TableFile::Bare(table) => table,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.atk_spike.is_empty() && self.atk_no_spike.is_empty()
    }

    fn attacker_table(&self, spike_planted: bool) -> &HashMap<String, f64> {
        if spike_planted {
            &self.atk_spike
        } else {
            &self.atk_no_spike
        }
    }

    pub fn attacker_probability(&self, state: XvX, spike_planted: bool) -> Option<f64> {
        self.attacker_table(spike_planted)
            .get(&state.key())
            .copied()
    }

    /// Win probability of `perspective` in `state` (`own` counts belong to `perspective`).
    /// Defenders use the complement of the attacker entry for the inverted state.
    /// Missing entries resolve to `default`.
    pub fn win_prob(
        &self,
        state: XvX,
        spike_planted: bool,
        perspective: Side,
        default: f64,
    ) -> f64 {
        let probability = match perspective {
            Side::Attack => self
                .attacker_probability(state, spike_planted)
                .unwrap_or(default),
            Side::Defense => {
                1.0 - self
                    .attacker_probability(state.inverse(), spike_planted)
                    .unwrap_or(default)
            }
        };
        probability.clamp(0.0, 1.0)
    }
}

/// Ground-truth probability once a side is fully eliminated.
/// `perspective_won` is None when the round winner cannot be determined.
pub fn terminal_probability(state: XvX, perspective_won: Option<bool>) -> Option<f64> {
    if !state.has_zero() {
        return None;
    }
    perspective_won.map(|won| if won { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> WinProbabilityTable {
        let mut table = WinProbabilityTable::default();
        table.atk_no_spike.insert("5v4".to_string(), 0.62);
        table.atk_no_spike.insert("4v5".to_string(), 0.35);
        table.atk_spike.insert("4v5".to_string(), 0.55);
        table
    }

    #[test]
    fn test_attacker_lookup_is_direct() {
        let table = sample_table();
        let p = table.win_prob(XvX::new(5, 4), false, Side::Attack, 0.5);
        assert!((p - 0.62).abs() < 1e-12);
    }

    #[test]
    fn test_defender_lookup_uses_inverse_complement() {
        let table = sample_table();
        // Defenders 5 v attackers 4 is the attacker state 4v5
        let p = table.win_prob(XvX::new(5, 4), false, Side::Defense, 0.5);
        assert!((p - 0.65).abs() < 1e-12);

        let planted = table.win_prob(XvX::new(5, 4), true, Side::Defense, 0.5);
        assert!((planted - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_missing_key_falls_back() {
        let table = sample_table();
        assert_eq!(table.win_prob(XvX::new(2, 2), false, Side::Attack, 0.5), 0.5);
        assert_eq!(table.win_prob(XvX::new(2, 2), true, Side::Defense, 0.5), 0.5);
    }

    #[test]
    fn test_terminal_override() {
        assert_eq!(terminal_probability(XvX::new(3, 0), Some(true)), Some(1.0));
        assert_eq!(terminal_probability(XvX::new(0, 2), Some(false)), Some(0.0));
        assert_eq!(terminal_probability(XvX::new(0, 2), None), None);
        assert_eq!(terminal_probability(XvX::new(1, 1), Some(true)), None);
    }

    #[test]
    fn test_parse_wrapped_and_bare() {
        let wrapped = r#"{ "win_probabilities": { "atk_no_spike": { "5v5": 0.48 } } }"#;
        let bare = r#"{ "atk_no_spike": { "5v5": 0.48 }, "def_spike": {} }"#;

        let a = WinProbabilityTable::from_json(wrapped).unwrap();
        let b = WinProbabilityTable::from_json(bare).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.attacker_probability(XvX::new(5, 5), false), Some(0.48));
    }
}
