use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classifier::JobFeatures;

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[schema(example = prompt_request_schema_example)]
pub(crate) struct PromptRequest {
    pub(crate) prompt: String,
    #[serde(default)]
    pub(crate) model_name: Option<String>,
    #[serde(default)]
    pub(crate) session_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
#[schema(example = job_prediction_request_schema_example)]
pub(crate) struct JobPredictionRequest {
    pub(crate) prov: i64,
    pub(crate) cma: i64,
    pub(crate) age_12: i64,
    pub(crate) gender: i64,
    pub(crate) marstat: i64,
    pub(crate) educ: i64,
}

impl From<JobPredictionRequest> for JobFeatures {
    fn from(value: JobPredictionRequest) -> Self {
        let JobPredictionRequest {
            prov,
            cma,
            age_12,
            gender,
            marstat,
            educ,
        } = value;
        JobFeatures {
            prov,
            cma,
            age_12,
            gender,
            marstat,
            educ,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub(crate) struct Welcome {
    pub(crate) message: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub(crate) struct Health {
    pub(crate) status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub(crate) struct ErrorResponse {
    pub(crate) error: String,
}

impl ErrorResponse {
    pub(crate) fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn prompt_request_schema_example() -> PromptRequest {
    PromptRequest {
        prompt: String::from("How do I get my engineering degree recognized in Ontario?"),
        model_name: Some(String::from("llama-3.2-90b-vision-preview")),
        session_id: Some(String::from("3f1c9a")),
    }
}

fn job_prediction_request_schema_example() -> JobPredictionRequest {
    JobPredictionRequest {
        prov: 1,
        cma: 1,
        age_12: 5,
        gender: 1,
        marstat: 1,
        educ: 3,
    }
}
