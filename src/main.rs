#[cfg(test)]
mod test_data;

mod classifier;
mod cli_args;
mod config;

#[cfg(feature = "server")]
mod conversation;
#[cfg(feature = "server")]
mod inference;
#[cfg(feature = "server")]
mod llm_client;
#[cfg(feature = "server")]
mod server;

#[cfg(feature = "server")]
use actix_web::rt;
use anyhow::Context;
use clap::Parser;

use crate::{
    classifier::{occupation_label, JobFeatures, OccupationClassifier},
    cli_args::{Cli, Commands},
};
#[cfg(feature = "server")]
use crate::{
    config::server::Config as ServerConfig,
    conversation::SessionStore,
    inference::Engine,
    llm_client::{LlmClientImpl, OpenAiChatClient},
    server::run_server,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        #[cfg(feature = "server")]
        Commands::Server(server_args) => {
            let config = ServerConfig::try_from(server_args)
                .context("Unable to read the system prompt")?;
            let system_runner = rt::System::new();

            log::info!("\n{config}");

            let classifier = OccupationClassifier::load(&config.model_path).with_context(|| {
                format!("Unable to load {}", config.model_path.display())
            })?;
            let sessions = SessionStore::new(config.session_settings());
            let llm_client = LlmClientImpl::OpenAi(OpenAiChatClient::new(
                &config.llm_url,
                config.api_key.as_deref(),
            ));

            let engine = Engine::new(llm_client, sessions, classifier);

            system_runner
                .block_on(async move { run_server(engine, &config.host, config.port)?.await })
                .map_err(anyhow::Error::from)
        }

        Commands::Predict(predict_args) => {
            let classifier = OccupationClassifier::load(&predict_args.model_path)
                .with_context(|| format!("Unable to load {}", predict_args.model_path.display()))?;
            let features = JobFeatures::from(&predict_args);

            let ranked = classifier.ranked(&features);
            for (rank, (code, probability)) in ranked.into_iter().take(3).enumerate() {
                println!("{}. {} ({probability:.3})", rank + 1, occupation_label(code)?);
            }
            Ok(())
        }
    }
}
