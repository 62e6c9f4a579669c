mod arguments;
mod client;
mod error;
mod openai;
mod protocol;

pub use arguments::LanguageServiceArguments;
pub(crate) use client::{LlmClientBackend, LlmClientImpl, LlmClientService};
pub(crate) use error::LlmClientError;
pub(crate) use openai::OpenAiChatClient;
pub use protocol::{Completion, LlmMessage, LlmRole};
