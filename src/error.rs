use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), module(commentary_error))]
pub enum CommentaryError {
    #[snafu(display("provider error: {source}"))]
    Provider {
        source: ProviderError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("analysis error: {source}"))]
    Analysis {
        source: AnalysisError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("config error: {source}"))]
    Config {
        source: ConfigError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("IO error: {source}"))]
    Io {
        source: std::io::Error,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("JSON error: {source}"))]
    Json {
        source: serde_json::Error,
        #[snafu(implicit)]
        location: snafu::Location,
    },
}

/// Failures of a single chat-completions call. None of these are retried.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub), module(provider_error))]
pub enum ProviderError {
    #[snafu(display("no API key configured"))]
    NoCredentials {
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("network failure: {message}"))]
    Network {
        message: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("provider returned status {status}: {body}"))]
    Status {
        status: u16,
        body: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("API error (status {status}): {message}"))]
    Api {
        status: u16,
        message: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("unexpected response shape: {message}"))]
    SchemaMismatch {
        message: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("provider returned an empty completion"))]
    EmptyResult {
        #[snafu(implicit)]
        location: snafu::Location,
    },
}

impl ProviderError {
    /// HTTP status carried by the error, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } | ProviderError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), module(analysis_error))]
pub enum AnalysisError {
    #[snafu(display("invalid analysis for move {move_number}: {message}"))]
    InvalidAnalysis {
        move_number: u32,
        message: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), module(config_error))]
pub enum ConfigError {
    #[snafu(display("could not determine home directory"))]
    NoHomeDirectory {
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("failed to parse config: {source}"))]
    ParseConfig {
        source: toml::de::Error,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    #[snafu(display("invalid config: {message}"))]
    Invalid {
        message: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },
}

pub type Result<T, E = CommentaryError> = std::result::Result<T, E>;
