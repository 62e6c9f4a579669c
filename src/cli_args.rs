use std::path::PathBuf;

use clap::{Parser, Subcommand};
#[cfg(feature = "server")]
use url::Url;

use crate::classifier::JobFeatures;

pub(crate) const DEFAULT_MODEL_PATH: &str = "assets/occupation_knn.json";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Serve the chat and occupation prediction API.
    #[cfg(feature = "server")]
    Server(ServerArgs),
    /// Print the most likely occupations for one person.
    Predict(PredictArgs),
}

#[cfg(feature = "server")]
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct ServerArgs {
    #[arg(long, default_value_t = String::from("0.0.0.0"))]
    pub(crate) host: String,
    #[arg(long, default_value_t = 8000)]
    pub(crate) port: u16,
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,
    #[arg(long, env = "LLM_URL", default_value = "https://api.groq.com/openai/v1")]
    pub(crate) llm_url: Url,
    #[arg(long, default_value_t = String::from("llama-3.2-90b-vision-preview"))]
    pub(crate) llm_name: String,
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub(crate) model_path: PathBuf,
    /// File holding the assistant persona. The built-in career mentor persona is used otherwise.
    #[arg(long)]
    pub(crate) system_prompt_path: Option<PathBuf>,
    /// Number of user/assistant turns kept per conversation, 0 keeps everything.
    #[arg(long, default_value_t = 50)]
    pub(crate) max_turns: usize,
    #[arg(long, default_value_t = 1024)]
    pub(crate) max_sessions: usize,
    #[arg(long, default_value_t = 3600)]
    pub(crate) session_idle_secs: u64,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct PredictArgs {
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub(crate) model_path: PathBuf,
    #[arg(long)]
    pub(crate) prov: i64,
    #[arg(long)]
    pub(crate) cma: i64,
    #[arg(long)]
    pub(crate) age_12: i64,
    #[arg(long)]
    pub(crate) gender: i64,
    #[arg(long)]
    pub(crate) marstat: i64,
    #[arg(long)]
    pub(crate) educ: i64,
}

impl From<&PredictArgs> for JobFeatures {
    fn from(value: &PredictArgs) -> Self {
        JobFeatures {
            prov: value.prov,
            cma: value.cma,
            age_12: value.age_12,
            gender: value.gender,
            marstat: value.marstat,
            educ: value.educ,
        }
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[cfg(feature = "server")]
    #[test]
    fn server_defaults() {
        let cli = Cli::try_parse_from(["apex-advisor", "server", "--api-key", "k"]).unwrap();
        let Commands::Server(args) = cli.command else {
            panic!("expected server command");
        };
        assert_eq!(args.port, 8000);
        assert_eq!(args.llm_name, "llama-3.2-90b-vision-preview");
        assert_eq!(args.max_turns, 50);
        assert_eq!(args.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn predict_requires_every_feature() {
        assert!(Cli::try_parse_from(["apex-advisor", "predict", "--prov", "1"]).is_err());

        let cli = Cli::try_parse_from([
            "apex-advisor",
            "predict",
            "--prov",
            "1",
            "--cma",
            "1",
            "--age-12",
            "5",
            "--gender",
            "1",
            "--marstat",
            "1",
            "--educ",
            "3",
        ])
        .unwrap();
        let Commands::Predict(args) = cli.command else {
            panic!("expected predict command");
        };
        assert_eq!(JobFeatures::from(&args).row(), [1.0, 1.0, 5.0, 1.0, 1.0, 3.0]);
    }
}
