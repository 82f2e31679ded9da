pub mod economy;
pub mod win_probability;

pub use economy::{EconomyCategory, EconomyTable, matchup_key};
pub use win_probability::{WinProbabilityTable, terminal_probability};

/// The two read-only lookup tables the engine is given
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub win_probability: WinProbabilityTable,
    pub economy: EconomyTable,
}

impl LookupTables {
    pub fn new(win_probability: WinProbabilityTable, economy: EconomyTable) -> Self {
        Self {
            win_probability,
            economy,
        }
    }
}
