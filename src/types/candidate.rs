// src/types/candidate.rs
use serde::{Deserialize, Serialize};

/// A candidate as returned by the search endpoint. Email arrives already masked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub email: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub graduation_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub project_count: u32,
    #[serde(default)]
    pub top_projects: Vec<ProjectSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub innovation_score: Option<f64>,
}
