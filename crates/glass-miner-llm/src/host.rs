//! Model host: owns the loaded model for the process lifetime.
//!
//! The batch driver is written against [`Generator`] so it can run with the
//! real llama.cpp host (feature `llm`) or with [`MockGenerator`] in tests.

use crate::extraction::{ExtractionError, ExtractionResult};

/// One capability: produce a continuation for a fully formed prompt.
pub trait Generator {
    /// Generate decoded text for the prompt. The result carries no JSON
    /// guarantee and may be truncated at the token budget.
    fn generate(&self, prompt: &str) -> ExtractionResult<String>;
}

/// Canned generator for driver tests, no model required.
///
/// Returns a fixed response, or fails with an inference error when the
/// prompt contains one of the configured failure markers.
pub struct MockGenerator {
    response: String,
    fail_markers: Vec<String>,
}

impl MockGenerator {
    /// Generator that always returns `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail_markers: Vec::new(),
        }
    }

    /// Fail any prompt containing `marker`.
    pub fn fail_when_contains(mut self, marker: impl Into<String>) -> Self {
        self.fail_markers.push(marker.into());
        self
    }
}

impl Generator for MockGenerator {
    fn generate(&self, prompt: &str) -> ExtractionResult<String> {
        for marker in &self.fail_markers {
            if prompt.contains(marker.as_str()) {
                return Err(ExtractionError::Inference(format!(
                    "mock failure triggered by `{marker}`"
                )));
            }
        }
        Ok(self.response.clone())
    }
}

#[cfg(feature = "llm")]
mod llama {
    use std::num::NonZeroU32;
    use std::path::Path;
    use std::sync::OnceLock;

    use llama_cpp_2::context::params::LlamaContextParams;
    use llama_cpp_2::llama_backend::LlamaBackend;
    use llama_cpp_2::llama_batch::LlamaBatch;
    use llama_cpp_2::model::params::LlamaModelParams;
    use llama_cpp_2::model::{AddBos, LlamaModel, Special};
    use llama_cpp_2::sampling::LlamaSampler;

    use super::Generator;
    use crate::extraction::{ExtractionError, ExtractionResult};
    use crate::prompts::apply_chat_template;

    /// Global llama.cpp backend (can only be initialized once per process).
    static LLAMA_BACKEND: OnceLock<Result<LlamaBackend, String>> = OnceLock::new();

    fn get_backend() -> ExtractionResult<&'static LlamaBackend> {
        let result = LLAMA_BACKEND.get_or_init(|| {
            let mut backend = LlamaBackend::init().map_err(|e| e.to_string())?;
            backend.void_logs();
            Ok(backend)
        });
        match result {
            Ok(backend) => Ok(backend),
            Err(e) => Err(ExtractionError::ModelLoad(format!(
                "failed to initialize llama.cpp backend: {e}"
            ))),
        }
    }

    /// llama.cpp-hosted GGUF model.
    ///
    /// The model stays loaded for the whole run; a fresh context is created
    /// per generation so one paper's KV state never leaks into the next.
    pub struct LlamaHost {
        model: LlamaModel,
        n_ctx: u32,
        max_new_tokens: usize,
    }

    impl LlamaHost {
        /// Load a GGUF model from disk.
        pub fn load<P: AsRef<Path>>(
            model_path: P,
            n_ctx: u32,
            max_new_tokens: usize,
        ) -> ExtractionResult<Self> {
            let backend = get_backend()?;

            let model_params = LlamaModelParams::default();
            let model = LlamaModel::load_from_file(backend, model_path.as_ref(), &model_params)
                .map_err(|e| ExtractionError::ModelLoad(e.to_string()))?;

            tracing::info!(
                model = %model_path.as_ref().display(),
                n_ctx,
                max_new_tokens,
                "loaded GGUF model"
            );

            Ok(Self {
                model,
                n_ctx,
                max_new_tokens,
            })
        }

        fn context_params(&self) -> ExtractionResult<LlamaContextParams> {
            let n_ctx = NonZeroU32::new(self.n_ctx)
                .ok_or_else(|| ExtractionError::ModelLoad("n_ctx must be non-zero".into()))?;
            Ok(LlamaContextParams::default().with_n_ctx(Some(n_ctx)))
        }

        /// Greedy autoregressive decoding of only the newly generated
        /// tokens, special tokens excluded from the decoded text.
        fn decode_new_tokens(&self, prompt: &str) -> ExtractionResult<String> {
            let backend = get_backend()?;
            let ctx_params = self.context_params()?;

            let mut ctx = self
                .model
                .new_context(backend, ctx_params)
                .map_err(|e| ExtractionError::Inference(e.to_string()))?;

            let input_tokens = self
                .model
                .str_to_token(prompt, AddBos::Never)
                .map_err(|e| ExtractionError::Inference(e.to_string()))?;

            let mut batch = LlamaBatch::new(input_tokens.len().max(512), 1);
            for (i, token) in input_tokens.iter().enumerate() {
                let is_last = i == input_tokens.len() - 1;
                batch
                    .add(*token, i as i32, &[0], is_last)
                    .map_err(|e| ExtractionError::Inference(e.to_string()))?;
            }
            ctx.decode(&mut batch)
                .map_err(|e| ExtractionError::Inference(e.to_string()))?;

            tracing::debug!(prompt_tokens = input_tokens.len(), "prompt ingested");

            let mut sampler = LlamaSampler::greedy();
            let mut response = String::new();
            let mut n_cur = input_tokens.len();

            for _ in 0..self.max_new_tokens {
                let new_token = sampler.sample(&ctx, -1);

                if new_token == self.model.token_eos() || self.model.is_eog_token(new_token) {
                    break;
                }

                // Plaintext rendering drops special control tokens.
                if let Ok(piece) = self.model.token_to_str(new_token, Special::Plaintext) {
                    response.push_str(&piece);
                }

                batch.clear();
                batch
                    .add(new_token, n_cur as i32, &[0], true)
                    .map_err(|e| ExtractionError::Inference(e.to_string()))?;
                ctx.decode(&mut batch)
                    .map_err(|e| ExtractionError::Inference(e.to_string()))?;
                n_cur += 1;
            }

            Ok(response)
        }
    }

    impl Generator for LlamaHost {
        fn generate(&self, prompt: &str) -> ExtractionResult<String> {
            let templated = apply_chat_template(prompt);
            self.decode_new_tokens(&templated)
        }
    }
}

#[cfg(feature = "llm")]
pub use llama::LlamaHost;
