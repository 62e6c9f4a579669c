use actix_web::{
    http::header::ContentType,
    web::{Data, Json, Path},
    HttpRequest, HttpResponse, Responder,
};
use utoipa::OpenApi;

use crate::{
    conversation::DEFAULT_SESSION_ID,
    inference::{Engine, QueryEngineError},
    llm_client::LlmClientImpl,
};

use super::{ErrorResponse, Health, JobPredictionRequest, PromptRequest, Welcome};

pub(crate) type ServedEngine = Engine<LlmClientImpl>;

/// Header a client uses to pick its conversation. Echoed on every prompt response.
pub(crate) const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

#[derive(OpenApi)]
#[openapi(
    paths(root, health, prompt, predict_jobs, end_session),
    components(
        schemas(PromptRequest),
        schemas(JobPredictionRequest),
        schemas(Welcome),
        schemas(Health),
        schemas(ErrorResponse)
    )
)]
pub(crate) struct ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = Welcome, content_type = "application/json")
    )
)]
pub(crate) async fn root() -> impl Responder {
    HttpResponse::Ok().json(Welcome {
        message: String::from("Welcome to the API! The server is running."),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = Health, content_type = "application/json")
    )
)]
pub(crate) async fn health() -> impl Responder {
    HttpResponse::Ok().json(Health {
        status: String::from("healthy"),
    })
}

#[utoipa::path(
    post,
    path = "/prompt",
    request_body(content = PromptRequest, content_type = "application/json"),
    params(
        ("x-session-id" = Option<String>, Header, description = "Conversation to continue, takes precedence over `session_id` in the body")
    ),
    responses(
        (status = 200, description = "Assistant reply. Upstream failures are reported in the body as \"Error: <message>\"", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed request or session id", body = ErrorResponse)
    )
)]
pub(crate) async fn prompt(
    request: HttpRequest,
    Json(PromptRequest {
        prompt,
        model_name,
        session_id,
    }): Json<PromptRequest>,
    engine: Data<ServedEngine>,
) -> impl Responder {
    let session_id = request
        .headers()
        .get(SESSION_HEADER)
        .map(|value| value.to_str().map(str::to_string).unwrap_or_default())
        .or(session_id)
        .map(|id| id.trim().to_string())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    if !is_valid_session_id(&session_id) {
        return HttpResponse::BadRequest().json(ErrorResponse::new(format!(
            "session id must be 1-{MAX_SESSION_ID_LEN} visible ASCII characters"
        )));
    }

    let result = engine
        .prompt(&session_id, prompt, model_name.as_deref())
        .await;

    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header((SESSION_HEADER, session_id))
        .body(result.response)
}

#[utoipa::path(
    post,
    path = "/predict-jobs",
    request_body(content = JobPredictionRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Three most likely occupations, most likely first", body = Vec<String>, content_type = "application/json"),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 500, description = "Model does not match the occupation list", body = ErrorResponse)
    )
)]
pub(crate) async fn predict_jobs(
    Json(request): Json<JobPredictionRequest>,
    engine: Data<ServedEngine>,
) -> impl Responder {
    match engine.predict_jobs(&request.into()) {
        Ok(occupations) => HttpResponse::Ok().json(occupations),
        Err(e) => query_error_response(e),
    }
}

fn query_error_response(e: QueryEngineError) -> HttpResponse {
    log::error!("{e}");
    match e {
        QueryEngineError::Classifier(_) => {
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/sessions/{session_id}",
    params(
        ("session_id" = String, Path, description = "Conversation to discard")
    ),
    responses(
        (status = 204, description = "Conversation discarded"),
        (status = 404, description = "No such conversation")
    )
)]
pub(crate) async fn end_session(
    session_id: Path<String>,
    engine: Data<ServedEngine>,
) -> impl Responder {
    if engine.end_session(&session_id) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}

fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_SESSION_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic())
}
