use crate::llm_client::{
    Completion, LanguageServiceArguments, LlmClientService, LlmMessage, LlmRole,
};

pub(crate) const DEFAULT_PERSONA: &str = "You are a Helpful mentor AI chatbot, you will help people regarding their employement, they will prvoide you with details of them in each message, and you have to give them advice.";

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u16 = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompletionResult {
    pub(crate) response: String,
    pub(crate) model_used: String,
    pub(crate) processing_time_ms: u64,
}

/// A single linear dialogue. The transcript always starts with the persona system message;
/// everything after it is appended in chronological order.
#[derive(Debug)]
pub(crate) struct ConversationSession {
    transcript: Vec<LlmMessage>,
    default_model: String,
    max_turns: Option<usize>,
}

impl ConversationSession {
    /// `max_turns` bounds the number of user/assistant pairs kept after the system message.
    /// `None` (or zero) keeps every turn.
    pub(crate) fn new<P: AsRef<str>, M: AsRef<str>>(
        persona: P,
        default_model: M,
        max_turns: Option<usize>,
    ) -> Self {
        Self {
            transcript: vec![LlmMessage::new(LlmRole::System, persona.as_ref())],
            default_model: default_model.as_ref().to_string(),
            max_turns: max_turns.filter(|turns| *turns > 0),
        }
    }

    #[cfg(test)]
    pub(crate) fn transcript(&self) -> &[LlmMessage] {
        &self.transcript
    }

    pub(crate) fn len(&self) -> usize {
        self.transcript.len()
    }

    #[cfg(test)]
    pub(crate) fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Records `prompt`, asks `llm_client` for the next assistant turn and records that too.
    ///
    /// A failed completion leaves the user message in place but records no assistant message;
    /// the failure is folded into the returned result as `"Error: <message>"` with a zero
    /// processing time.
    pub(crate) async fn submit<B: LlmClientService>(
        &mut self,
        llm_client: &B,
        prompt: String,
        model_override: Option<&str>,
    ) -> CompletionResult {
        let model = model_override
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(self.default_model.as_str())
            .to_string();

        self.push(LlmMessage::new(LlmRole::User, prompt));

        let arguments = LanguageServiceArguments {
            messages: &self.transcript,
            model: &model,
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let completion = llm_client.complete(arguments).await;
        match completion {
            Ok(Completion { text, elapsed_ms }) => {
                self.push(LlmMessage::new(LlmRole::Assistant, text.as_str()));
                CompletionResult {
                    response: text,
                    model_used: model,
                    processing_time_ms: elapsed_ms,
                }
            }
            Err(e) => {
                log::error!("Completion with {model} failed: {e}");
                CompletionResult {
                    response: format!("Error: {e}"),
                    model_used: model,
                    processing_time_ms: 0,
                }
            }
        }
    }

    fn push(&mut self, message: LlmMessage) {
        self.transcript.push(message);

        let Some(max_turns) = self.max_turns else {
            return;
        };
        let history = self.transcript.len() - 1;
        let bound = max_turns * 2;
        if history > bound {
            // Whole turns go at once so the kept history still opens with a user message.
            let excess = history - bound;
            let evict = (excess + excess % 2).min(history - 1);
            self.transcript.drain(1..1 + evict);
            log::debug!("Evicted {evict} messages from transcript");
        }
    }
}
