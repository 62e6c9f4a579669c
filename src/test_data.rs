#[cfg(feature = "server")]
use std::{collections::VecDeque, sync::Mutex, time::Duration};

#[cfg(feature = "server")]
use crate::{
    classifier::OccupationClassifier,
    conversation::{SessionSettings, SessionStore, DEFAULT_PERSONA},
    inference::Engine,
    llm_client::{LanguageServiceArguments, LlmClientBackend, LlmClientError, LlmMessage},
};

pub(crate) const BUNDLED_ARTIFACT: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/assets/occupation_knn.json");

#[cfg(feature = "server")]
pub(crate) const TEST_MODEL: &str = "llama-3.2-90b-vision-preview";

#[cfg(feature = "server")]
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) messages: Vec<LlmMessage>,
    pub(crate) model: String,
    pub(crate) temperature: f32,
    pub(crate) max_tokens: u16,
}

/// Completion backend that replays canned replies in order and records every request.
/// Once the script runs out every call fails with an empty response.
#[cfg(feature = "server")]
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, LlmClientError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

#[cfg(feature = "server")]
impl ScriptedBackend {
    pub(crate) fn new(replies: Vec<Result<String, LlmClientError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(feature = "server")]
impl LlmClientBackend for ScriptedBackend {
    async fn get_response(
        &self,
        arguments: LanguageServiceArguments<'_>,
    ) -> Result<String, LlmClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: arguments.messages.to_vec(),
            model: arguments.model.to_string(),
            temperature: arguments.temperature,
            max_tokens: arguments.max_tokens,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmClientError::EmptyResponse))
    }
}

#[cfg(feature = "server")]
pub(crate) fn session_store() -> SessionStore {
    SessionStore::new(SessionSettings {
        persona: DEFAULT_PERSONA.to_string(),
        default_model: TEST_MODEL.to_string(),
        max_turns: None,
        max_sessions: 16,
        idle_timeout: Duration::from_secs(3600),
    })
}

#[cfg(feature = "server")]
pub(crate) fn engine_with(backend: ScriptedBackend) -> Engine<ScriptedBackend> {
    let classifier = OccupationClassifier::load(BUNDLED_ARTIFACT).unwrap();
    Engine::new(backend, session_store(), classifier)
}
