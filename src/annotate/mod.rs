pub mod coord;
pub mod filter;
pub mod gather;
pub mod sanitize;

use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::MoveAnalysis;
use crate::config::CommentaryConfig;
use crate::prompt::{self, CommentaryRequest};
use crate::provider::LlmProvider;

/// Prefix marking machine-written comments in the game record.
pub const ANNOTATION_PREFIX: &str = "AI: ";

/// Outcome of one remote call after sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryResult {
    pub text: String,
    pub succeeded: bool,
}

impl CommentaryResult {
    fn failed() -> Self {
        Self {
            text: String::new(),
            succeeded: false,
        }
    }
}

/// Entry point for move commentary. Holds the shared provider; everything
/// else is local to each call, so one service can serve many threads.
#[derive(Clone)]
pub struct CommentaryService {
    provider: Arc<dyn LlmProvider>,
}

impl CommentaryService {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Produce the annotation for one move, or `None`.
    ///
    /// Never fails: disabled config, small swings, bad input and provider
    /// errors all end in `None`, with the cause logged.
    pub fn comment(&self, config: &CommentaryConfig, analysis: &MoveAnalysis) -> Option<String> {
        self.comment_with(config, analysis, false)
    }

    /// Like [`comment`](Self::comment), but `force` bypasses the trigger threshold.
    pub fn comment_with(
        &self,
        config: &CommentaryConfig,
        analysis: &MoveAnalysis,
        force: bool,
    ) -> Option<String> {
        let move_number = analysis.move_number;

        if !config.is_enabled() {
            tracing::debug!(move_number, "commentary disabled or no API key");
            return None;
        }

        let context = match gather::build_context(analysis) {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(move_number, "skipping commentary: {e}");
                return None;
            }
        };

        if !force {
            match filter::pre_llm_filter(&context, config.trigger, config.score_threshold) {
                filter::FilterDecision::Skip(reason) => {
                    tracing::debug!(move_number, "no commentary: {reason}");
                    return None;
                }
                filter::FilterDecision::Comment { delta } => {
                    tracing::debug!(move_number, delta, "key move");
                }
            }
        }

        let request = prompt::render(&context, &config.language);
        if config.debug {
            tracing::info!(
                move_number,
                language = %request.language_code,
                "prompt: {}",
                request.user_prompt
            );
        }

        let result = self.generate(config, &request);
        if !result.succeeded {
            return None;
        }
        Some(format!("{ANNOTATION_PREFIX}{}", result.text))
    }

    /// Call the provider for a rendered request and sanitize its answer.
    pub fn generate(
        &self,
        config: &CommentaryConfig,
        request: &CommentaryRequest,
    ) -> CommentaryResult {
        let Some(api_key) = config.api_key.as_deref() else {
            tracing::debug!("no API key configured");
            return CommentaryResult::failed();
        };

        match self.provider.complete(api_key, request) {
            Ok(raw) => {
                if config.debug {
                    tracing::info!(provider = self.provider.name(), "response: {raw}");
                }
                let text = sanitize::sanitize_str(&raw);
                if text.is_empty() {
                    tracing::warn!(
                        provider = self.provider.name(),
                        "empty commentary after sanitizing"
                    );
                    return CommentaryResult::failed();
                }
                CommentaryResult {
                    text,
                    succeeded: true,
                }
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    model = self.provider.model(),
                    status = e.status(),
                    "commentary request failed: {e}"
                );
                CommentaryResult::failed()
            }
        }
    }

    /// Comment on many moves at once, at most `config.max_concurrency` in flight.
    ///
    /// The result is aligned with `moves`.
    pub fn comment_batch(
        &self,
        config: &CommentaryConfig,
        moves: &[MoveAnalysis],
    ) -> Vec<Option<String>> {
        if !config.is_enabled() {
            tracing::debug!(count = moves.len(), "commentary disabled or no API key");
            return vec![None; moves.len()];
        }

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_concurrency)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("could not start worker pool, running sequentially: {e}");
                return moves.iter().map(|m| self.comment(config, m)).collect();
            }
        };

        pool.install(|| {
            moves
                .par_iter()
                .map(|analysis| self.comment(config, analysis))
                .collect()
        })
    }
}
