use std::{fmt::Display, path::PathBuf, time::Duration};

use colored::Colorize;
use url::Url;

use crate::{
    cli_args::ServerArgs,
    conversation::{SessionSettings, DEFAULT_PERSONA},
};

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) api_key: Option<String>,
    pub(crate) host: String,
    pub(crate) llm_name: String,
    pub(crate) llm_url: Url,
    pub(crate) max_sessions: usize,
    pub(crate) max_turns: Option<usize>,
    pub(crate) model_path: PathBuf,
    pub(crate) port: u16,
    pub(crate) protocol: String,
    pub(crate) session_idle: Duration,
    pub(crate) system_prompt: String,
}

pub(crate) trait ConfigUrl {
    fn url(&self) -> Result<Url, url::ParseError>;
}

impl ConfigUrl for Config {
    fn url(&self) -> Result<Url, url::ParseError> {
        let Config {
            protocol,
            host,
            port,
            ..
        } = self;

        Url::parse(&format!("{protocol}://{host}:{port}"))
    }
}

impl Config {
    pub(crate) fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            persona: self.system_prompt.clone(),
            default_model: self.llm_name.clone(),
            max_turns: self.max_turns,
            max_sessions: self.max_sessions,
            idle_timeout: self.session_idle,
        }
    }
}

impl TryFrom<ServerArgs> for Config {
    type Error = std::io::Error;

    fn try_from(value: ServerArgs) -> Result<Self, Self::Error> {
        let system_prompt = match value.system_prompt_path {
            Some(path) => std::fs::read_to_string(path)?.trim().to_string(),
            None => DEFAULT_PERSONA.to_string(),
        };

        Ok(Config {
            api_key: value.api_key,
            host: value.host,
            llm_name: value.llm_name,
            llm_url: value.llm_url,
            max_sessions: value.max_sessions,
            max_turns: Some(value.max_turns).filter(|turns| *turns > 0),
            model_path: value.model_path,
            port: value.port,
            protocol: "http".to_string(),
            session_idle: Duration::from_secs(value.session_idle_secs),
            system_prompt,
        })
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Config {
            api_key,
            host: _,
            llm_name,
            llm_url,
            max_sessions,
            max_turns,
            model_path,
            port: _,
            protocol: _,
            session_idle,
            system_prompt: _,
        } = self;

        let llm_url = llm_url.as_str().blue();
        let llm_model = llm_name.bright_blue();
        let credentials = if api_key.is_some() {
            "with an API key".green()
        } else {
            "without an API key".red()
        };
        let model_path = model_path.display().to_string().green();
        let history = match max_turns {
            Some(turns) => format!("the last {turns} turns"),
            None => "every turn".to_string(),
        };

        let engine_url = self.url().map_err(|_| std::fmt::Error)?;
        let [engine_prompt_path, engine_predict_path, engine_api_doc_path] = [
            engine_url.join("prompt"),
            engine_url.join("predict-jobs"),
            engine_url.join("api-doc"),
        ]
        .map(|url| url.map(|url| url.to_string().yellow()));

        write!(
            f,
            r#"Engine running.
    Serving chat on {}.
    Serving occupation predictions on {}.
    Serving OpenAPI documentation on {}.
Using completion service at {llm_url} {credentials}.
    Using {llm_model}.
Using occupation model at {model_path}.
Keeping {history} for up to {max_sessions} conversations, idle ones expire after {}s."#,
            engine_prompt_path.map_err(|_| std::fmt::Error)?,
            engine_predict_path.map_err(|_| std::fmt::Error)?,
            engine_api_doc_path.map_err(|_| std::fmt::Error)?,
            session_idle.as_secs(),
        )
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use crate::cli_args::{Cli, Commands};

    use super::*;

    fn server_args(extra: &[&str]) -> ServerArgs {
        let args = ["apex-advisor", "server", "--api-key", "secret-key"]
            .into_iter()
            .chain(extra.iter().copied());
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Server(args) => args,
            Commands::Predict(_) => unreachable!(),
        }
    }

    #[test]
    fn zero_turns_disables_the_history_bound() {
        let config = Config::try_from(server_args(&["--max-turns", "0"])).unwrap();
        assert_eq!(config.max_turns, None);
        assert_eq!(config.session_settings().persona, DEFAULT_PERSONA);
    }

    #[test]
    fn display_never_prints_the_api_key() {
        let config = Config::try_from(server_args(&[])).unwrap();
        let rendered = config.to_string();
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("llama-3.2-90b-vision-preview"));
    }

    #[test]
    fn missing_persona_file_is_an_error() {
        let args = server_args(&["--system-prompt-path", "/nonexistent/persona.txt"]);
        assert!(Config::try_from(args).is_err());
    }
}
