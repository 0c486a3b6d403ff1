//! glass-miner: batch extraction of glass compositions from papers.

use std::path::PathBuf;

use clap::Parser;
use glass_miner_core::RunConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glass-miner")]
#[command(about = "Extract glass composition and property data from papers with a local LLM")]
#[command(version)]
struct Cli {
    /// Directory of input papers (every file is attempted)
    #[arg(long, default_value = "./papers")]
    input_dir: PathBuf,

    /// Directory for <stem>.json outputs, created if missing
    #[arg(long, default_value = "./resp")]
    output_dir: PathBuf,

    /// Path to the GGUF model artifact
    #[arg(long, default_value = "./models/qwen3-14b-q4_k_m.gguf")]
    model: PathBuf,

    /// Maximum new tokens per generation
    #[arg(long, default_value_t = 32768)]
    max_new_tokens: usize,

    /// Context window size
    #[arg(long, default_value_t = 40960)]
    n_ctx: u32,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        RunConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            model_path: self.model,
            max_new_tokens: self.max_new_tokens,
            n_ctx: self.n_ctx,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Cli::parse().into_config();

    #[cfg(feature = "llm")]
    {
        use glass_miner_cli::run_batch;
        use glass_miner_llm::host::LlamaHost;

        let host = LlamaHost::load(&config.model_path, config.n_ctx, config.max_new_tokens)?;
        let report = run_batch(&config, &host)?;

        if report.all_failed() {
            anyhow::bail!("all {} attempted files failed", report.attempted);
        }
        return Ok(());
    }

    #[cfg(not(feature = "llm"))]
    {
        let _ = config;
        anyhow::bail!("built without the `llm` feature; rebuild with `--features llm` to load models")
    }
}
