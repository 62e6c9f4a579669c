use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use url::Url;

use super::{
    error::LlmClientError, LanguageServiceArguments, LlmClientBackend, LlmMessage, LlmRole,
};

/// Chat completion client for any OpenAI compatible provider (Groq in production).
pub(crate) struct OpenAiChatClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiChatClient {
    pub(crate) fn new(api_base: &Url, api_key: Option<&str>) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_base(api_base.as_str().trim_end_matches('/'));
        if let Some(key) = api_key {
            openai_config = openai_config.with_api_key(key);
        }

        Self {
            client: Client::with_config(openai_config),
        }
    }

    fn create_chat_request(
        arguments: LanguageServiceArguments<'_>,
    ) -> Result<CreateChatCompletionRequest, OpenAIError> {
        let messages = arguments
            .messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>, _>>()?;

        CreateChatCompletionRequestArgs::default()
            .model(arguments.model)
            .messages(messages)
            .temperature(arguments.temperature)
            .max_tokens(arguments.max_tokens)
            .build()
    }
}

fn to_request_message(
    LlmMessage { role, content }: &LlmMessage,
) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    let message = match role {
        LlmRole::System => ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(content.clone())
                .build()?,
        ),
        LlmRole::User => ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(content.clone())
                .build()?,
        ),
        LlmRole::Assistant => ChatCompletionRequestMessage::Assistant(
            ChatCompletionRequestAssistantMessageArgs::default()
                .content(content.clone())
                .build()?,
        ),
    };
    Ok(message)
}

impl LlmClientBackend for OpenAiChatClient {
    async fn get_response(
        &self,
        arguments: LanguageServiceArguments<'_>,
    ) -> Result<String, LlmClientError> {
        let request = Self::create_chat_request(arguments)?;

        let response = self.client.chat().create(request).await?;

        let response = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmClientError::EmptyResponse)?
            .message
            .content
            .ok_or(LlmClientError::EmptyResponse)?;
        Ok(response)
    }
}
