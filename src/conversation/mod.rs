mod session;
mod store;

pub(crate) use session::{CompletionResult, ConversationSession, DEFAULT_PERSONA};
pub(crate) use store::{SessionSettings, SessionStore, DEFAULT_SESSION_ID};
