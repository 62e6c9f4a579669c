mod api;
mod launch;
mod protocol;

pub(crate) use api::*;
#[cfg(test)]
pub(crate) use launch::routes;
pub(crate) use launch::run_server;

pub(super) use protocol::{ErrorResponse, Health, JobPredictionRequest, PromptRequest, Welcome};
