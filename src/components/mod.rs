pub mod registry;
pub mod types;

pub use registry::{ComponentRegistry, compute};
pub use types::{Component, ComponentMap, ComponentValues, ComponentWeights, PlayerMatchKey};
