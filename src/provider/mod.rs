pub mod openai;

pub use openai::OpenAiProvider;

use crate::error::ProviderError;
use crate::prompt::CommentaryRequest;

/// A chat model that turns a rendered prompt into commentary text.
///
/// The API key is passed on every call and never stored by the provider.
/// Implementations must be safe to share across threads; a provider holds
/// only reusable transport state.
pub trait LlmProvider: Send + Sync {
    /// One request/response round trip. No retries.
    fn complete(&self, api_key: &str, request: &CommentaryRequest)
        -> Result<String, ProviderError>;
    fn check_auth(&self, api_key: &str) -> Result<AuthStatus, ProviderError>;
    fn name(&self) -> &str;
    fn model(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Valid,
    Invalid(String),
}
