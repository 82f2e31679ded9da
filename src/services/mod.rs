pub mod processing;
pub mod report;

pub use processing::{RatingMap, RatingService};
