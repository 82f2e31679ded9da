pub mod calculator;
pub mod normalization;
pub mod types;

pub use calculator::RatingCalculator;
pub use normalization::fit_normalization;
pub use types::{FinalRatingParams, NormalizationParams, PlayerInfo, PlayerRating, ZScoreParams};
