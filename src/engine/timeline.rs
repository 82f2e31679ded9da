use crate::config::settings::EngineSettings;
use crate::domain::{Kill, Round, RoundResultCode};

/// Time after which kills no longer move win probability because the
/// outcome is already decided. None means every kill counts.
pub fn effective_cutoff(round: &Round, settings: &EngineSettings) -> Option<u64> {
    match round.result_code {
        RoundResultCode::Defuse => round.defuse_time_ms,
        RoundResultCode::Elimination => round.kills().map(|k| k.time_ms).max(),
        RoundResultCode::Detonate => round
            .plant_time_ms
            .map(|plant| plant.saturating_add(settings.detonation_delay_ms)),
        RoundResultCode::Other => None,
    }
}

pub fn is_counted(kill: &Kill, cutoff: Option<u64>) -> bool {
    cutoff.is_none_or(|limit| kill.time_ms <= limit)
}

/// Counted kills ordered by time; equal times keep record order
pub fn build_timeline(round: &Round, cutoff: Option<u64>) -> Vec<&Kill> {
    let mut timeline: Vec<&Kill> = round.kills().filter(|k| is_counted(k, cutoff)).collect();
    timeline.sort_by_key(|k| k.time_ms);
    timeline
}
