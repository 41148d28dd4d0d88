use std::sync::Arc;

use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::annotate::CommentaryService;
use crate::config::CommentaryConfig;
use crate::error::commentary_error::{IoSnafu, JsonSnafu};
use crate::error::Result;
use crate::provider::OpenAiProvider;

/// Read and parse JSON from a file path, or from stdin when `input` is `-`.
pub(crate) fn read_json<T: DeserializeOwned>(input: &str) -> Result<T> {
    let contents = if input == "-" {
        std::io::read_to_string(std::io::stdin()).context(IoSnafu)?
    } else {
        std::fs::read_to_string(input).context(IoSnafu)?
    };
    serde_json::from_str(&contents).context(JsonSnafu)
}

/// Build the service with the provider described by `config`.
pub(crate) fn build_service(config: &CommentaryConfig) -> CommentaryService {
    CommentaryService::new(Arc::new(OpenAiProvider::new(&config.provider)))
}

/// Apply command-line overrides on top of the loaded config.
pub(crate) fn apply_overrides(
    config: &mut CommentaryConfig,
    language: Option<String>,
    threshold: Option<f64>,
) -> Result<()> {
    if let Some(language) = language {
        config.language = language;
    }
    if let Some(threshold) = threshold {
        config.score_threshold = threshold;
    }
    config
        .validate()
        .context(crate::error::commentary_error::ConfigSnafu)
}
