//! Run configuration with documented defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for one batch extraction run.
///
/// Every field has a default so a run can start with nothing but a model
/// path; the CLI overrides individual fields from flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Directory of input papers. Every file in it is attempted, no
    /// extension filter. Default: `./papers`.
    pub input_dir: PathBuf,
    /// Directory for `<stem>.json` outputs, created if missing.
    /// Default: `./resp`.
    pub output_dir: PathBuf,
    /// Path to the GGUF model artifact.
    /// Default: `./models/qwen3-14b-q4_k_m.gguf`.
    pub model_path: PathBuf,
    /// Maximum new tokens per generation; generations may be truncated at
    /// this budget. Default: 32768.
    pub max_new_tokens: usize,
    /// Context window size passed to the model. Default: 40960.
    pub n_ctx: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./papers"),
            output_dir: PathBuf::from("./resp"),
            model_path: PathBuf::from("./models/qwen3-14b-q4_k_m.gguf"),
            max_new_tokens: 32768,
            n_ctx: 40960,
        }
    }
}

impl RunConfig {
    /// Output path for an input file name: `<output_dir>/<stem>.json`,
    /// where the stem is everything before the first `.` (the whole name
    /// when there is no dot).
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        self.output_dir.join(format!("{stem}.json"))
    }
}
