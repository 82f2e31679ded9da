use log::{debug, trace};

use crate::config::settings::{EngineSettings, SpikeTiming};
use crate::domain::{Kill, Match, Round};
use crate::tables::{LookupTables, terminal_probability};

use super::classify::{KillClass, classify_kill};
use super::sides::resolve_sides;
use super::state::{AliveState, Side, Sides, XvX};
use super::timeline::{build_timeline, effective_cutoff};

/// Probability bookkeeping for a kill that moved the round
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredKill {
    pub killer_side: Side,
    pub before: XvX,
    pub after: XvX,
    pub win_before: f64,
    pub win_after: f64,
    pub spike_planted: bool,
    pub base_impact: f64,
    pub decay: f64,
    pub economic_modifier: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Scored(ScoredKill),
    NonCombat,
    FriendlyFire,
    Unattributed,
    /// One side was already wiped when the kill happened
    SideEliminated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundEvent {
    pub killer: Option<String>,
    pub victim: Option<String>,
    pub time_ms: u64,
    pub outcome: EventOutcome,
    /// Side that lost a player on this event, None when nothing was decremented
    pub eliminated: Option<Side>,
    pub alive_after: AliveState,
}

impl RoundEvent {
    pub fn impact(&self) -> f64 {
        match &self.outcome {
            EventOutcome::Scored(scored) => scored.impact,
            _ => 0.0,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self.outcome, EventOutcome::Scored(_))
    }
}

/// Replay of one round's counted kills
#[derive(Debug, Clone, PartialEq)]
pub struct RoundImpact {
    pub round_number: u32,
    pub sides: Sides,
    pub cutoff: Option<u64>,
    pub excluded_kills: usize,
    pub events: Vec<RoundEvent>,
}

impl RoundImpact {
    pub fn kill_contrib_of(&self, puuid: &str) -> f64 {
        self.events
            .iter()
            .filter(|e| e.is_scored() && e.killer.as_deref() == Some(puuid))
            .fold(0.0, |acc, e| acc + e.impact())
    }

    /// Negated impact of the kills where `puuid` died
    pub fn death_contrib_of(&self, puuid: &str) -> f64 {
        self.events
            .iter()
            .filter(|e| e.is_scored() && e.victim.as_deref() == Some(puuid))
            .fold(0.0, |acc, e| acc - e.impact())
    }
}

/// Replays kills against the lookup tables. Holds no state between rounds.
pub struct ImpactEngine<'a> {
    tables: &'a LookupTables,
    settings: &'a EngineSettings,
}

impl<'a> ImpactEngine<'a> {
    pub fn new(tables: &'a LookupTables, settings: &'a EngineSettings) -> Self {
        Self { tables, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        self.settings
    }

    pub fn simulate_match(&self, game: &Match) -> Vec<RoundImpact> {
        game.rounds
            .iter()
            .map(|round| self.simulate_round(game, round))
            .collect()
    }

    pub fn simulate_round(&self, game: &Match, round: &Round) -> RoundImpact {
        let sides = resolve_sides(game, round, self.settings.halftime_round);
        let cutoff = effective_cutoff(round, self.settings);
        let timeline = build_timeline(round, cutoff);
        let excluded_kills = round.kills().count() - timeline.len();

        let winning_side = round
            .winning_team
            .as_deref()
            .and_then(|team| sides.side_of(team));

        let mut alive = AliveState::new(self.settings.team_size);
        let mut events = Vec::with_capacity(timeline.len());

        for kill in timeline {
            let class = classify_kill(game, &sides, kill);
            let (outcome, eliminated) = self.replay(round, kill, class, winning_side, &mut alive);

            trace!(
                "Round {} @{}ms: {:?} -> {:?}",
                round.number, kill.time_ms, class, outcome
            );

            events.push(RoundEvent {
                killer: kill.killer.clone(),
                victim: kill.victim.clone(),
                time_ms: kill.time_ms,
                outcome,
                eliminated,
                alive_after: alive,
            });
        }

        debug!(
            "Match {} round {}: {} kills replayed, {} after cutoff",
            game.id(),
            round.number,
            events.len(),
            excluded_kills
        );

        RoundImpact {
            round_number: round.number,
            sides,
            cutoff,
            excluded_kills,
            events,
        }
    }

    fn replay(
        &self,
        round: &Round,
        kill: &Kill,
        class: KillClass,
        winning_side: Option<Side>,
        alive: &mut AliveState,
    ) -> (EventOutcome, Option<Side>) {
        match class {
            KillClass::NonCombat { .. } => {
                (EventOutcome::NonCombat, eliminate(alive, class.victim_side()))
            }
            KillClass::Unattributed { .. } => {
                (EventOutcome::Unattributed, eliminate(alive, class.victim_side()))
            }
            KillClass::FriendlyFire { .. } => {
                (EventOutcome::FriendlyFire, eliminate(alive, class.victim_side()))
            }
            KillClass::Combat { killer, victim } => {
                if alive.count(killer) == 0 || alive.count(victim) == 0 {
                    return (EventOutcome::SideEliminated, eliminate(alive, Some(victim)));
                }
                let scored = self.score_kill(round, kill, killer, winning_side, alive);
                (EventOutcome::Scored(scored), Some(victim))
            }
        }
    }

    /// Applies the victim's elimination and computes the killer-side impact
    fn score_kill(
        &self,
        round: &Round,
        kill: &Kill,
        killer_side: Side,
        winning_side: Option<Side>,
        alive: &mut AliveState,
    ) -> ScoredKill {
        let table = &self.tables.win_probability;
        let fallback = self.settings.default_win_probability;
        let spike_planted = self.spike_planted(round, kill);

        let before = alive.xvx(killer_side);
        let win_before = table.win_prob(before, spike_planted, killer_side, fallback);

        alive.eliminate(killer_side.opponent());
        let after = alive.xvx(killer_side);
        let perspective_won = winning_side.map(|winner| winner == killer_side);
        let win_after = terminal_probability(after, perspective_won)
            .unwrap_or_else(|| table.win_prob(after, spike_planted, killer_side, fallback));

        let base_impact = win_after - win_before;
        let decay = self.late_kill_decay(kill.time_ms);
        let economic_modifier = self.tables.economy.modifier(
            round.loadout_of(kill.killer.as_deref().unwrap_or_default()),
            round.loadout_of(kill.victim.as_deref().unwrap_or_default()),
            self.settings.default_win_rate,
        );

        ScoredKill {
            killer_side,
            before,
            after,
            win_before,
            win_after,
            spike_planted,
            base_impact,
            decay,
            economic_modifier,
            impact: base_impact * decay * economic_modifier,
        }
    }

    fn spike_planted(&self, round: &Round, kill: &Kill) -> bool {
        match self.settings.spike_timing {
            SpikeTiming::RoundWide => round.spike_planted(),
            SpikeTiming::AfterPlant => round
                .plant_time_ms
                .is_some_and(|plant| plant <= kill.time_ms),
        }
    }

    fn late_kill_decay(&self, time_ms: u64) -> f64 {
        if time_ms > self.settings.late_kill_threshold_ms {
            self.settings.late_kill_factor
        } else {
            1.0
        }
    }
}

fn eliminate(alive: &mut AliveState, side: Option<Side>) -> Option<Side> {
    let side = side?;
    if alive.eliminate(side) { Some(side) } else { None }
}
