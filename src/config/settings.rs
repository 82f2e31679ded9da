use clap::ValueEnum;

use crate::components::ComponentWeights;
use crate::rating::NormalizationParams;

/// When a planted spike starts to count for win-probability lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SpikeTiming {
    /// The whole round uses the spike tables once a plant happened
    #[default]
    RoundWide,
    /// Only kills at or after the plant timestamp use the spike tables
    AfterPlant,
}

pub struct EngineSettings {
    pub team_size: u8,
    pub halftime_round: u32,
    pub detonation_delay_ms: u64,
    pub late_kill_threshold_ms: u64,
    pub late_kill_factor: f64,
    pub default_win_probability: f64,
    pub default_win_rate: f64,
    pub base_kill_damage: u32,
    pub spike_timing: SpikeTiming,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            team_size: 5,
            halftime_round: 12,
            detonation_delay_ms: 45_000,
            late_kill_threshold_ms: 100_000,
            late_kill_factor: 0.5,
            default_win_probability: 0.5,
            default_win_rate: 0.5,
            base_kill_damage: 100,
            spike_timing: SpikeTiming::RoundWide,
        }
    }
}

#[derive(Default)]
pub struct RatingSettings {
    pub weights: ComponentWeights,
    pub normalization: NormalizationParams,
}

pub struct AppConfig {
    pub engine: EngineSettings,
    pub rating: RatingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            engine: EngineSettings::default(),
            rating: RatingSettings::default(),
        }
    }
}
