// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::core::{ConfigManager, SearchClient};
use crate::import::ImportReport;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/search/criteria", data = "<request>")]
pub async fn extract_criteria(
    request: Json<StandardRequest<SearchRequest>>,
    config: &State<ServerConfig>,
) -> Json<DataResponse<CriteriaData>> {
    handlers::extract_criteria_handler(request, config).await
}

#[post("/search/candidates", data = "<request>")]
pub async fn search_candidates(
    request: Json<StandardRequest<SearchRequest>>,
    config: &State<ServerConfig>,
    client: &State<SearchClient>,
) -> Result<Json<DataResponse<CandidateSearchData>>, Json<StandardErrorResponse>> {
    handlers::search_candidates_handler(request, config, client).await
}

#[get("/search/examples")]
pub async fn get_examples() -> Json<DataResponse<ExampleQueriesData>> {
    handlers::get_examples_handler().await
}

#[post("/students/import", data = "<request>")]
pub async fn import_students(
    request: Json<StandardRequest<ImportRequest>>,
) -> Result<Json<DataResponse<ImportReport>>, Json<StandardErrorResponse>> {
    handlers::import_students_handler(request).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path and method".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "INVALID_REQUEST_BODY".to_string(),
        vec![
            "Send a JSON object with a string 'query' field".to_string(),
            "Use positive integers for 'page' and 'limit'".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the Rocket instance without launching it
pub fn build_rocket(config: &ConfigManager) -> Result<Rocket<Build>> {
    let search_client = SearchClient::new(
        config.service.search_url.clone(),
        config.service.timeout_seconds,
    )?;

    let server_config = ServerConfig {
        service: config.service.clone(),
    };

    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("address", "0.0.0.0"));

    Ok(rocket::custom(figment)
        .attach(Cors)
        .manage(server_config)
        .manage(search_client)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable_entity, internal_error],
        )
        .mount(
            "/api",
            routes![
                extract_criteria,
                search_candidates,
                get_examples,
                import_students,
                health,
                options,
            ],
        ))
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let rocket = build_rocket(&config)?;

    info!("Starting InTransparency search API");
    info!("Environment: {}", config.environment);
    info!("Search service: {}", config.service.search_url);
    info!("Server: http://0.0.0.0:{}", config.server.port);

    rocket
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
