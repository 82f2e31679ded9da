pub mod files;
pub mod settings;

pub use settings::{AppConfig, EngineSettings, RatingSettings, SpikeTiming};
