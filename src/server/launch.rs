use actix_cors::Cors;
use actix_web::{
    dev::Server,
    error::{InternalError, JsonPayloadError},
    middleware,
    web::{self, Data},
    App, HttpRequest, HttpResponse, HttpServer,
};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use super::{
    end_session, health, predict_jobs, prompt, root, ApiDoc, ErrorResponse, ServedEngine,
};

/// Registers every endpoint. The longer `/api/...` paths stay available next to the short ones.
pub(crate) fn routes(config: &mut web::ServiceConfig) {
    config
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health))
        .route("/api/health", web::get().to(health))
        .route("/prompt", web::post().to(prompt))
        .route("/api/llm/prompt/text", web::post().to(prompt))
        .route("/predict-jobs", web::post().to(predict_jobs))
        .route("/api/llm/predict-jobs", web::post().to(predict_jobs))
        .route("/sessions/{session_id}", web::delete().to(end_session));
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {err}");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

pub(crate) fn run_server<S: AsRef<str>>(
    engine: ServedEngine,
    host: S,
    port: u16,
) -> Result<Server, std::io::Error> {
    let openapi = ApiDoc::openapi();

    let engine = Data::new(engine);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .app_data(engine.clone())
            .configure(routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .service(Redoc::with_url("/api-doc", openapi.clone()))
    });

    server = server.bind((host.as_ref(), port))?;
    let s = server.run();
    Ok(s)
}
