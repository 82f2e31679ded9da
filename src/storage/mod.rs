pub mod match_store;

pub use match_store::{MatchStore, read_json, to_json, write_json};
