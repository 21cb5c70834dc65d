// src/web/handlers/search_handlers.rs
use crate::core::SearchClient;
use crate::search::{clamp_pagination, extract_criteria, CandidateSearchParams, EXAMPLE_QUERIES};
use crate::web::types::{
    CandidateSearchData, CriteriaData, DataResponse, ExampleQueriesData, SearchRequest,
    ServerConfig, StandardErrorResponse, StandardRequest, WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

fn build_params(
    request: &SearchRequest,
    config: &ServerConfig,
) -> (crate::search::SearchCriteria, CandidateSearchParams) {
    let criteria = extract_criteria(&request.query);
    let (page, limit) = clamp_pagination(
        request.page,
        request.limit,
        config.service.default_page_size,
        config.service.max_page_size,
    );
    let params = CandidateSearchParams::from_criteria(&criteria, page, limit);
    (criteria, params)
}

pub async fn extract_criteria_handler(
    request: Json<StandardRequest<SearchRequest>>,
    config: &State<ServerConfig>,
) -> Json<DataResponse<CriteriaData>> {
    let conversation_id = request.conversation_id();
    let (criteria, params) = build_params(&request.data, config);

    let message = if criteria.is_unstructured() {
        "No structured criteria recognised, searching by text only".to_string()
    } else {
        "Search criteria extracted".to_string()
    };

    Json(DataResponse::success(
        message,
        CriteriaData::new(criteria, &params),
        conversation_id,
    ))
}

pub async fn search_candidates_handler(
    request: Json<StandardRequest<SearchRequest>>,
    config: &State<ServerConfig>,
    client: &State<SearchClient>,
) -> Result<Json<DataResponse<CandidateSearchData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let (criteria, params) = build_params(&request.data, config);

    match client.search_candidates(&params).await {
        Ok(result) => {
            info!(
                "Candidate search returned {} of {} candidates",
                result.candidates.len(),
                result.pagination.total
            );

            let message = format!("Found {} candidates", result.pagination.total);
            Ok(Json(DataResponse::success(
                message,
                CandidateSearchData {
                    criteria,
                    candidates: result.candidates,
                    pagination: result.pagination,
                },
                conversation_id,
            )))
        }
        Err(e) => {
            error!("Candidate search failed: {:#}", e);
            Err(Json(StandardErrorResponse::new(
                "Candidate search service unavailable".to_string(),
                "SEARCH_SERVICE_ERROR".to_string(),
                vec![
                    "Try again in a few moments".to_string(),
                    "Contact support if the problem persists".to_string(),
                ],
                conversation_id,
            )))
        }
    }
}

pub async fn get_examples_handler() -> Json<DataResponse<ExampleQueriesData>> {
    let examples = EXAMPLE_QUERIES.iter().map(|q| q.to_string()).collect();
    Json(DataResponse::success(
        "Example queries".to_string(),
        ExampleQueriesData { examples },
        None,
    ))
}
