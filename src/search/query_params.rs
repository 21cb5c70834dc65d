// src/search/query_params.rs
//! Projection of `SearchCriteria` onto the candidate search endpoint's query string.

use serde::Serialize;

use super::criteria::SearchCriteria;

/// Query parameters understood by the paginated candidate search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSearchParams {
    pub search: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl CandidateSearchParams {
    /// Only the first university and the first field of study are forwarded.
    pub fn from_criteria(criteria: &SearchCriteria, page: u32, limit: u32) -> Self {
        Self {
            search: criteria.search.clone(),
            university: criteria.universities.first().cloned(),
            skills: (!criteria.skills.is_empty()).then(|| criteria.skills.join(",")),
            gpa_min: criteria.gpa_min,
            graduation_year: criteria.graduation_year.clone(),
            location: criteria.location.clone(),
            major: criteria.field_of_study.first().cloned(),
            page,
            limit,
        }
    }

    /// Ordered name/value pairs, absent filters omitted
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("search", self.search.clone())];

        if let Some(university) = &self.university {
            pairs.push(("university", university.clone()));
        }
        if let Some(skills) = &self.skills {
            pairs.push(("skills", skills.clone()));
        }
        if let Some(gpa_min) = self.gpa_min {
            pairs.push(("gpaMin", gpa_min.to_string()));
        }
        if let Some(year) = &self.graduation_year {
            pairs.push(("graduationYear", year.clone()));
        }
        if let Some(location) = &self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(major) = &self.major {
            pairs.push(("major", major.clone()));
        }

        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// Page numbers start at 1; limits are clamped to `1..=max_limit`.
pub fn clamp_pagination(
    page: Option<u32>,
    limit: Option<u32>,
    default_limit: u32,
    max_limit: u32,
) -> (u32, u32) {
    let max_limit = max_limit.max(1);
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(default_limit).clamp(1, max_limit);
    (page, limit)
}
