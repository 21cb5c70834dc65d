// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

use crate::core::config_manager::ServiceConfig;
use crate::search::{CandidateSearchParams, SearchCriteria};
use crate::types::{CandidateSummary, Pagination};

pub struct ServerConfig {
    pub service: ServiceConfig,
}

// ===== Requests =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchRequest {
    pub query: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ImportRequest {
    pub csv: String,
    pub university: Option<String>,
}

// Request types with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

// Helper trait for extracting conversation_id
pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

// ===== Response payloads =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CriteriaData {
    pub criteria: SearchCriteria,
    pub params: Vec<QueryParam>,
}

impl CriteriaData {
    pub fn new(criteria: SearchCriteria, params: &CandidateSearchParams) -> Self {
        let params = params
            .to_pairs()
            .into_iter()
            .map(|(name, value)| QueryParam {
                name: name.to_string(),
                value,
            })
            .collect();
        Self { criteria, params }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CandidateSearchData {
    pub criteria: SearchCriteria,
    pub candidates: Vec<CandidateSummary>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ExampleQueriesData {
    pub examples: Vec<String>,
}

// ===== Standard envelopes =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }
}
