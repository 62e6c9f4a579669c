mod engine;
mod error;

pub(crate) use engine::Engine;
pub(crate) use error::QueryEngineError;
