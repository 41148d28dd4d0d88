use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ProviderSettings;
use crate::error::provider_error::{
    ApiSnafu, EmptyResultSnafu, NetworkSnafu, NoCredentialsSnafu, SchemaMismatchSnafu, StatusSnafu,
};
use crate::error::ProviderError;
use crate::prompt::CommentaryRequest;
use crate::provider::{AuthStatus, LlmProvider};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Longest slice of a provider error body kept for diagnostics.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Chat-completions client over one long-lived `ureq::Agent`.
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    agent: ureq::Agent,
}

impl OpenAiProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .build();
        Self {
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            agent,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(
        &self,
        api_key: &str,
        messages: Vec<ApiMessage<'_>>,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        snafu::ensure!(!api_key.trim().is_empty(), NoCredentialsSnafu);

        let body = ApiRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens,
            messages,
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "sending chat completion");

        match self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {api_key}"))
            .set("Content-Type", "application/json")
            .send_json(&body)
        {
            Ok(resp) => {
                let status = resp.status();
                let text = resp.into_string().map_err(|e| {
                    NetworkSnafu {
                        message: format!("failed to read response body: {e}"),
                    }
                    .build()
                })?;
                parse_completion(status, &scrub(&text, api_key))
            }
            Err(ureq::Error::Status(status, resp)) => {
                let text = scrub(&resp.into_string().unwrap_or_default(), api_key);
                match serde_json::from_str::<ApiErrorResponse>(&text) {
                    Ok(err) => ApiSnafu {
                        status,
                        message: truncate(&err.error.message),
                    }
                    .fail(),
                    Err(_) => StatusSnafu {
                        status,
                        body: truncate(&text),
                    }
                    .fail(),
                }
            }
            Err(ureq::Error::Transport(t)) => NetworkSnafu {
                message: t.to_string(),
            }
            .fail(),
        }
    }
}

// -- Chat-completions wire types --

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extract `choices[0].message.content` from a successful response body.
fn parse_completion(status: u16, body: &str) -> Result<String, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        SchemaMismatchSnafu {
            message: format!("response is not JSON: {e}"),
        }
        .build()
    })?;

    if let Ok(err) = serde_json::from_value::<ApiErrorResponse>(value.clone()) {
        return ApiSnafu {
            status,
            message: truncate(&err.error.message),
        }
        .fail();
    }

    let response: ApiResponse = serde_json::from_value(value).map_err(|e| {
        SchemaMismatchSnafu {
            message: e.to_string(),
        }
        .build()
    })?;

    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| {
            SchemaMismatchSnafu {
                message: "response has no choices",
            }
            .build()
        })?
        .message
        .content
        .ok_or_else(|| {
            SchemaMismatchSnafu {
                message: "first choice has no message content",
            }
            .build()
        })?;

    snafu::ensure!(!content.trim().is_empty(), EmptyResultSnafu);
    Ok(content)
}

/// Remove the credential from text that may end up in logs or errors.
fn scrub(text: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return text.to_string();
    }
    text.replace(api_key, "[redacted]")
}

fn truncate(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_ERROR_BODY_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

impl LlmProvider for OpenAiProvider {
    fn complete(
        &self,
        api_key: &str,
        request: &CommentaryRequest,
    ) -> Result<String, ProviderError> {
        let messages = vec![
            ApiMessage {
                role: "system",
                content: &request.system_instruction,
            },
            ApiMessage {
                role: "user",
                content: &request.user_prompt,
            },
        ];
        self.send(api_key, messages, self.max_tokens)
    }

    fn check_auth(&self, api_key: &str) -> Result<AuthStatus, ProviderError> {
        // Smallest possible request; any well-formed answer proves the key works.
        let messages = vec![ApiMessage {
            role: "user",
            content: "hi",
        }];

        match self.send(api_key, messages, 1) {
            Ok(_) | Err(ProviderError::EmptyResult { .. }) => Ok(AuthStatus::Valid),
            Err(ProviderError::NoCredentials { .. }) => {
                Ok(AuthStatus::Invalid("no API key configured".to_string()))
            }
            Err(ProviderError::Api {
                status: 401 | 403,
                message,
                ..
            }) => Ok(AuthStatus::Invalid(message)),
            Err(ProviderError::Status {
                status: status @ (401 | 403),
                ..
            }) => Ok(AuthStatus::Invalid(format!("rejected with status {status}"))),
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Black secures the corner."}}]}"#;
        assert_eq!(
            parse_completion(200, body).unwrap(),
            "Black secures the corner."
        );
    }

    #[test]
    fn test_parse_completion_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_completion(200, body).unwrap(), "first");
    }

    #[test]
    fn test_parse_completion_schema_mismatch() {
        for body in [
            "not json",
            r#"{"result":"text"}"#,
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"role":"assistant"}}]}"#,
            r#"{"choices":[{"text":"legacy"}]}"#,
        ] {
            let err = parse_completion(200, body).unwrap_err();
            assert!(
                matches!(err, ProviderError::SchemaMismatch { .. }),
                "{body}: {err}"
            );
        }
    }

    #[test]
    fn test_parse_completion_empty() {
        let body = r#"{"choices":[{"message":{"content":"  \n "}}]}"#;
        assert!(matches!(
            parse_completion(200, body),
            Err(ProviderError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_parse_completion_error_body() {
        let body = r#"{"error":{"message":"model overloaded","type":"server_error"}}"#;
        let err = parse_completion(200, body).unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 200, .. }));
        assert!(err.to_string().contains("model overloaded"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ApiRequest {
            model: "gpt-4o-mini",
            temperature: 0.3,
            max_tokens: 120,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: "sys",
                },
                ApiMessage {
                    role: "user",
                    content: "usr",
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 120);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "usr");
    }

    #[test]
    fn test_scrub_removes_key() {
        let text = "Incorrect API key provided: sk-secret-123.";
        assert_eq!(
            scrub(text, "sk-secret-123"),
            "Incorrect API key provided: [redacted]."
        );
        assert_eq!(scrub(text, ""), text);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "é".repeat(MAX_ERROR_BODY_CHARS + 5);
        let cut = truncate(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 3);
    }

    #[test]
    fn test_empty_key_is_rejected_without_network() {
        let provider = OpenAiProvider::new(&ProviderSettings {
            endpoint: "http://127.0.0.1:9/unreachable".to_string(),
            ..ProviderSettings::default()
        });
        let request = CommentaryRequest {
            system_instruction: "s".to_string(),
            user_prompt: "u".to_string(),
            language_code: "en".to_string(),
        };
        assert!(matches!(
            provider.complete("", &request),
            Err(ProviderError::NoCredentials { .. })
        ));
        assert_eq!(
            provider.check_auth("  ").unwrap(),
            AuthStatus::Invalid("no API key configured".to_string())
        );
    }
}
