//! Higher-level operations over frames: grouping, statistics, cleaning

mod clean;
mod group;
mod stats;

pub use clean::BoundPolicy;
pub use group::GroupBy;
pub use stats::{describe, Summary};
