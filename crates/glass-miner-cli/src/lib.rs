//! Batch driver library for the glass-miner CLI.

pub mod batch;

pub use batch::run_batch;
