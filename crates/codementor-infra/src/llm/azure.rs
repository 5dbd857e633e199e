//! Azure OpenAI completion provider.
//!
//! Uses [`async_openai`] with [`AzureConfig`] for type-safe request and
//! response handling. Configuration is an explicitly constructed struct
//! loaded from the environment at startup -- never module-level constants,
//! never committed to source.

use anyhow::Context;
use async_openai::Client;
use async_openai::config::AzureConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use codementor_core::llm::CompletionProvider;
use codementor_types::chat::{ChatMessage, MessageRole};
use codementor_types::llm::LlmError;

/// Default Azure OpenAI API version when the environment does not override it.
const DEFAULT_API_VERSION: &str = "2024-10-21";

/// Configuration for the Azure OpenAI provider.
///
/// Recognized options: api_key, endpoint, deployment, api_version.
#[derive(Clone)]
pub struct AzureOpenAiConfig {
    /// API key for the Azure OpenAI resource.
    pub api_key: SecretString,
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    /// Deployment name of the chat model.
    pub deployment: String,
    /// API version string, e.g. `2024-10-21`.
    pub api_version: String,
}

impl AzureOpenAiConfig {
    /// Build a configuration with the default API version.
    pub fn new(api_key: SecretString, endpoint: &str, deployment: &str) -> Self {
        Self {
            api_key,
            endpoint: endpoint.to_string(),
            deployment: deployment.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Override the API version.
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    /// Load the configuration from `CODEMENTOR_AZURE_*` environment
    /// variables. `CODEMENTOR_AZURE_API_VERSION` is optional.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("CODEMENTOR_AZURE_API_KEY")
            .context("CODEMENTOR_AZURE_API_KEY is not set")?;
        let endpoint = std::env::var("CODEMENTOR_AZURE_ENDPOINT")
            .context("CODEMENTOR_AZURE_ENDPOINT is not set")?;
        let deployment = std::env::var("CODEMENTOR_AZURE_DEPLOYMENT")
            .context("CODEMENTOR_AZURE_DEPLOYMENT is not set")?;

        let mut config = Self::new(SecretString::from(api_key), &endpoint, &deployment);
        if let Ok(version) = std::env::var("CODEMENTOR_AZURE_API_VERSION") {
            config = config.with_api_version(&version);
        }
        Ok(config)
    }
}

/// Azure OpenAI chat completion provider.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct AzureOpenAiProvider {
    client: Client<AzureConfig>,
    deployment: String,
}

impl AzureOpenAiProvider {
    /// Create a new provider from a configuration.
    pub fn new(config: AzureOpenAiConfig) -> Self {
        let azure_config = AzureConfig::new()
            .with_api_base(&config.endpoint)
            .with_api_key(config.api_key.expose_secret())
            .with_deployment_id(&config.deployment)
            .with_api_version(&config.api_version);

        Self {
            client: Client::with_config(azure_config),
            deployment: config.deployment,
        }
    }
}

/// Map a transcript message to the async-openai request type.
fn map_message(msg: &ChatMessage) -> ChatCompletionRequestMessage {
    match msg.role {
        MessageRole::System => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(msg.content.clone()),
                name: None,
            })
        }
        MessageRole::User => {
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                name: None,
            })
        }
        MessageRole::Assistant => {
            #[allow(deprecated)]
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                    msg.content.clone(),
                )),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

impl CompletionProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure_openai"
    }

    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let mut request_messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(messages.len() + 1);
        request_messages.push(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(system.to_string()),
                name: None,
            },
        ));
        request_messages.extend(messages.iter().map(map_message));

        let request = CreateChatCompletionRequest {
            // With Azure the deployment in the URL selects the model; the
            // field is still required by the protocol.
            model: self.deployment.clone(),
            messages: request_messages,
            ..Default::default()
        };

        debug!(
            deployment = %self.deployment,
            message_count = messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited {
                    retry_after_ms: None,
                }
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited {
                retry_after_ms: None,
            },
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}
