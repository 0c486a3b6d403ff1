//! Glass-Miner Core Library
//!
//! Domain layer for batch extraction of glass compositions and properties
//! from research papers via a locally hosted language model.
//!
//! # Architecture
//!
//! ```text
//! papers/*.txt → Prompt Builder → Model Host → raw generation
//!                                                   │
//!                                      strip reasoning preamble
//!                                                   │
//!                                      locate `{ … }` payload
//!                                                   │
//!                                      parse + schema validation
//!                                                   │
//!                                            resp/<stem>.json
//! ```
//!
//! # Core Principle
//!
//! **Nothing is persisted without passing schema validation.** A payload the
//! model merely claims is JSON is parsed and checked before it reaches disk.
//!
//! # Modules
//!
//! - [`models`]: extraction schema (ExtractionOutput, Composition, Property)
//! - [`payload`]: reasoning-marker stripping and brace-bounded payload slicing
//! - [`config`]: run configuration with documented defaults
//! - [`report`]: per-run success/failure accounting

pub mod config;
pub mod models;
pub mod payload;
pub mod report;

// Re-export commonly used types
pub use config::RunConfig;
pub use models::{Composition, CompositionKind, ExtractionOutput, Property, ValidationError};
pub use report::{BatchReport, FileFailure};
