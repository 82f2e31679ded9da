pub mod aggregator;
pub mod classify;
pub mod impact;
pub mod metrics;
pub mod sides;
pub mod state;
pub mod timeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregator::{MatchSummary, PlayerTotals, compute_components, summarize_match};
pub use classify::{KillClass, classify_kill};
pub use impact::{EventOutcome, ImpactEngine, RoundEvent, RoundImpact, ScoredKill};
pub use sides::resolve_sides;
pub use state::{AliveState, Side, Sides, XvX};
