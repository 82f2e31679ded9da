pub mod models;
pub mod validation;

pub use models::{
    ArmorTier, DamageEvent, Economy, FinishingDamage, Kill, Match, MatchInfo, Player,
    PlayerRoundStat, PlayerStats, Puuid, Round, RoundResultCode, TeamId,
};
pub use validation::validate_match;
