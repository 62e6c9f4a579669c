use crate::{
    classifier::{JobFeatures, OccupationClassifier},
    conversation::{CompletionResult, SessionStore},
    llm_client::LlmClientBackend,
};

use super::QueryEngineError;

pub(crate) struct Engine<B> {
    llm_client: B,
    sessions: SessionStore,
    classifier: OccupationClassifier,
}

impl<B: LlmClientBackend> Engine<B> {
    pub(crate) fn new(
        llm_client: B,
        sessions: SessionStore,
        classifier: OccupationClassifier,
    ) -> Self {
        Self {
            llm_client,
            sessions,
            classifier,
        }
    }

    /// Runs one chat turn in the session named `session_id`. Turns of the same session are
    /// serialized; other sessions and predictions are not blocked by an in-flight turn.
    pub(crate) async fn prompt(
        &self,
        session_id: &str,
        prompt: String,
        model_name: Option<&str>,
    ) -> CompletionResult {
        let session = self.sessions.session(session_id);
        let mut session = session.lock().await;

        let result = session.submit(&self.llm_client, prompt, model_name).await;
        log::info!(
            "Session {session_id}: {} answered in {}ms, transcript holds {} messages, {} sessions live",
            result.model_used,
            result.processing_time_ms,
            session.len(),
            self.sessions.len()
        );
        result
    }

    pub(crate) fn predict_jobs(
        &self,
        features: &JobFeatures,
    ) -> Result<[String; 3], QueryEngineError> {
        let top = self.classifier.predict_top3(features)?;
        log::info!("Predicted {top:?} for {features:?}");
        Ok(top)
    }

    pub(crate) fn end_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id)
    }

    #[cfg(test)]
    pub(crate) fn llm_client(&self) -> &B {
        &self.llm_client
    }

    #[cfg(test)]
    pub(crate) fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::llm_client::LlmRole;
    use crate::test_data::{engine_with, ScriptedBackend};

    #[actix_rt::test]
    async fn sessions_do_not_leak_into_each_other() {
        let engine = engine_with(ScriptedBackend::new(vec![
            Ok("hello alice".to_string()),
            Ok("hello bob".to_string()),
        ]));

        engine.prompt("alice", "I am Alice".to_string(), None).await;
        engine.prompt("bob", "I am Bob".to_string(), None).await;

        let calls = engine.llm_client.calls();
        assert_eq!(calls[1].messages.len(), 2);
        assert!(calls[1]
            .messages
            .iter()
            .all(|m| !m.content.contains("Alice")));
        assert_eq!(engine.sessions().len(), 2);
    }

    #[actix_rt::test]
    async fn concurrent_turns_on_one_session_do_not_interleave() {
        let engine = engine_with(
            ScriptedBackend::new(vec![Ok("first".to_string()), Ok("second".to_string())])
                .with_delay(Duration::from_millis(20)),
        );

        tokio::join!(
            engine.prompt("shared", "one".to_string(), None),
            engine.prompt("shared", "two".to_string(), None),
        );

        let session = engine.sessions().session("shared");
        let session = session.lock().await;
        let roles = session
            .transcript()
            .iter()
            .map(|m| m.role)
            .collect::<Vec<_>>();
        assert_eq!(
            roles,
            [
                LlmRole::System,
                LlmRole::User,
                LlmRole::Assistant,
                LlmRole::User,
                LlmRole::Assistant
            ]
        );
    }

    #[actix_rt::test]
    async fn ending_a_session_starts_over() {
        let engine = engine_with(ScriptedBackend::new(vec![
            Ok("a".to_string()),
            Ok("b".to_string()),
        ]));

        engine.prompt("s", "first".to_string(), None).await;
        assert!(engine.end_session("s"));
        engine.prompt("s", "second".to_string(), None).await;

        assert_eq!(engine.llm_client.calls()[1].messages.len(), 2);
        assert!(!engine.end_session("missing"));
    }
}
