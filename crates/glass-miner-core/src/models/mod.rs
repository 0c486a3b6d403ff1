//! Domain models for the glass-miner extraction schema.

mod composition;

pub use composition::*;
