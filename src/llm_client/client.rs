use std::time::Instant;

use super::{Completion, LanguageServiceArguments, LlmClientError, OpenAiChatClient};

pub(crate) trait LlmClientBackend {
    async fn get_response(
        &self,
        arguments: LanguageServiceArguments<'_>,
    ) -> Result<String, LlmClientError>;
}

impl<T> LlmClientService for T where T: LlmClientBackend {}
pub(crate) trait LlmClientService: LlmClientBackend {
    /// Issues a single completion request. Elapsed time covers only the round trip and is
    /// truncated to whole milliseconds. Failures are returned as-is; there is no retry.
    async fn complete(
        &self,
        arguments: LanguageServiceArguments<'_>,
    ) -> Result<Completion, LlmClientError> {
        let start = Instant::now();
        let text = self.get_response(arguments).await?;
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        Ok(Completion { text, elapsed_ms })
    }
}

pub(crate) enum LlmClientImpl {
    OpenAi(OpenAiChatClient),
    #[cfg(test)]
    Scripted(crate::test_data::ScriptedBackend),
}

impl LlmClientBackend for LlmClientImpl {
    async fn get_response(
        &self,
        arguments: LanguageServiceArguments<'_>,
    ) -> Result<String, LlmClientError> {
        match self {
            LlmClientImpl::OpenAi(o) => o.get_response(arguments).await,
            #[cfg(test)]
            LlmClientImpl::Scripted(s) => s.get_response(arguments).await,
        }
    }
}
