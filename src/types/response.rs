use serde::{Deserialize, Serialize};

use crate::types::candidate::CandidateSummary;

// ===== Search Service Response Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSearchResponse {
    pub candidates: Vec<CandidateSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchServiceError {
    pub error: String,
}
