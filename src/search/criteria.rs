// src/search/criteria.rs
//! Keyword-based extraction of structured search criteria from a recruiter query.
//!
//! Every rule below is a plain substring or regex test against the lowercased
//! query. Several fields are assigned by a sequence of independent checks in
//! which a later match overwrites an earlier one; that precedence is part of
//! the contract with the search endpoint and must not be turned into a union.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use super::vocabulary::{
    self, BILINGUAL_LANGUAGES, FIELDS_OF_STUDY, LANGUAGES, LOCATION_RULES,
    MULTILINGUAL_LANGUAGES, SKILLS, SOFT_SKILLS, UNIVERSITY_RULES,
};

/// Number of characters of the raw query kept in `search`.
pub const MAX_SEARCH_CHARS: usize = 100;

static GPA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.\d+)\+?\s*gpa").expect("valid GPA regex"));

static GRADUATION_YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b202[4-7]\b").expect("valid graduation year regex"));

static LANGUAGE_COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\+\s*languages?").expect("valid language count regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    #[serde(rename = "Available immediately")]
    Immediately,
    #[serde(rename = "Available now")]
    Now,
    #[serde(rename = "Open to offers")]
    OpenToOffers,
}

impl Availability {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Immediately => "Available immediately",
            Self::Now => "Available now",
            Self::OpenToOffers => "Open to offers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerificationLevel {
    #[serde(rename = "100")]
    Full,
    #[serde(rename = "90+")]
    High,
}

impl VerificationLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "100",
            Self::High => "90+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Senior,
}

impl ExperienceLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Senior => "senior",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Availability, VerificationLevel, ExperienceLevel);

/// Structured filters derived from a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub field_of_study: Vec<String>,
    pub universities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_level: Option<VerificationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    pub search: String,
}

impl SearchCriteria {
    /// True when no structured filter was recognised; `search` is always set.
    pub fn is_unstructured(&self) -> bool {
        self.skills.is_empty()
            && self.soft_skills.is_empty()
            && self.field_of_study.is_empty()
            && self.universities.is_empty()
            && self.location.is_none()
            && self.languages.is_empty()
            && self.availability.is_none()
            && self.verification_level.is_none()
            && self.gpa_min.is_none()
            && self.graduation_year.is_none()
            && self.experience_level.is_none()
    }
}

/// Convert a recruiter query into search criteria. Total over all inputs.
pub fn extract_criteria(raw_query: &str) -> SearchCriteria {
    let q = raw_query.to_lowercase();

    SearchCriteria {
        skills: vocabulary::scan(SKILLS, &q),
        soft_skills: vocabulary::scan(SOFT_SKILLS, &q),
        field_of_study: vocabulary::scan(FIELDS_OF_STUDY, &q),
        universities: universities(&q),
        location: location(&q),
        languages: languages(&q),
        availability: availability(&q),
        verification_level: verification_level(&q),
        gpa_min: gpa_min(&q),
        graduation_year: graduation_year(&q),
        experience_level: experience_level(&q),
        search: crate::utils::truncate_chars(raw_query, MAX_SEARCH_CHARS),
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn universities(q: &str) -> Vec<String> {
    let mut universities = Vec::new();
    for rule in UNIVERSITY_RULES {
        if rule.matches(q) {
            universities = to_owned_list(rule.value);
        }
    }
    universities
}

fn location(q: &str) -> Option<String> {
    let mut location = None;
    for rule in LOCATION_RULES {
        if rule.matches(q) {
            location = Some(rule.value.to_string());
        }
    }
    location
}

fn languages(q: &str) -> Vec<String> {
    let mut languages = vocabulary::scan(LANGUAGES, q);
    if q.contains("bilingual") {
        languages = to_owned_list(BILINGUAL_LANGUAGES);
    }
    if q.contains("multilingual") || LANGUAGE_COUNT_PATTERN.is_match(q) {
        languages = to_owned_list(MULTILINGUAL_LANGUAGES);
    }
    languages
}

fn availability(q: &str) -> Option<Availability> {
    let mut availability = None;
    if q.contains("immediately") || q.contains("asap") {
        availability = Some(Availability::Immediately);
    }
    if q.contains("available now") {
        availability = Some(Availability::Now);
    }
    if q.contains("open to offers") {
        availability = Some(Availability::OpenToOffers);
    }
    availability
}

// "100% verified" must stay at the full level, so the generic "verified"
// check only applies when the full-verification phrases are absent.
fn verification_level(q: &str) -> Option<VerificationLevel> {
    if q.contains("100%") || q.contains("fully verified") {
        Some(VerificationLevel::Full)
    } else if q.contains("verified") || q.contains("90%") {
        Some(VerificationLevel::High)
    } else {
        None
    }
}

fn gpa_min(q: &str) -> Option<f64> {
    GPA_PATTERN
        .captures(q)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn graduation_year(q: &str) -> Option<String> {
    let mut year = None;
    if q.contains("recent grad") || q.contains("new grad") {
        year = Some("2024".to_string());
    }
    if let Some(m) = GRADUATION_YEAR_PATTERN.find(q) {
        year = Some(m.as_str().to_string());
    }
    year
}

fn experience_level(q: &str) -> Option<ExperienceLevel> {
    let mut level = None;
    if q.contains("junior") || q.contains("entry") {
        level = Some(ExperienceLevel::Entry);
    }
    if q.contains("senior") {
        level = Some(ExperienceLevel::Senior);
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_yields_empty_criteria() {
        let criteria = extract_criteria("");
        assert_eq!(criteria, SearchCriteria::default());
        assert!(criteria.is_unstructured());
        assert_eq!(criteria.search, "");
    }

    #[test]
    fn test_search_is_truncated_to_100_chars() {
        let long = "x".repeat(250);
        assert_eq!(extract_criteria(&long).search.len(), 100);

        let accented = "è".repeat(120);
        let criteria = extract_criteria(&accented);
        assert_eq!(criteria.search.chars().count(), 100);
        assert!(accented.starts_with(&criteria.search));
    }

    #[test]
    fn test_search_keeps_original_case() {
        let criteria = extract_criteria("Python in MILAN");
        assert_eq!(criteria.search, "Python in MILAN");
        assert_eq!(criteria.location.as_deref(), Some("Milan"));
    }

    #[test]
    fn test_computer_science_from_milan() {
        let criteria = extract_criteria(
            "Find me Computer Science grads from Milan who speak English and Italian",
        );
        assert!(criteria.field_of_study.contains(&"computer science".to_string()));
        assert_eq!(criteria.location.as_deref(), Some("Milan"));
        assert!(criteria.languages.contains(&"english".to_string()));
        assert!(criteria.languages.contains(&"italian".to_string()));
        assert!(criteria.graduation_year.is_none());
    }

    #[test]
    fn test_politecnico_available_immediately() {
        let criteria = extract_criteria(
            "I need Data Science students from Politecnico di Milano, available immediately",
        );
        assert!(criteria.field_of_study.contains(&"data science".to_string()));
        assert_eq!(
            criteria.universities,
            vec!["Politecnico di Milano", "Politecnico di Torino"]
        );
        assert_eq!(criteria.availability, Some(Availability::Immediately));
    }

    #[test]
    fn test_engineering_python_ml_fully_verified() {
        let criteria = extract_criteria(
            "Looking for Engineering students with Python and ML, 100% verified profiles",
        );
        assert!(criteria.field_of_study.contains(&"engineering".to_string()));
        assert!(criteria.skills.contains(&"python".to_string()));
        assert!(criteria.skills.contains(&"ml".to_string()));
        assert_eq!(criteria.verification_level, Some(VerificationLevel::Full));
    }

    #[test]
    fn test_plain_verified_is_high_level() {
        let criteria = extract_criteria("verified profiles only");
        assert_eq!(criteria.verification_level, Some(VerificationLevel::High));
        let criteria = extract_criteria("at least 90% complete");
        assert_eq!(criteria.verification_level, Some(VerificationLevel::High));
    }

    #[test]
    fn test_bilingual_with_gpa() {
        let criteria = extract_criteria("bilingual engineer with a 3.5+ GPA");
        assert_eq!(criteria.languages, vec!["Italian", "English"]);
        assert_eq!(criteria.gpa_min, Some(3.5));
    }

    #[test]
    fn test_bilingual_overrides_individual_languages() {
        let criteria = extract_criteria("bilingual, speaks french and german");
        assert_eq!(criteria.languages, vec!["Italian", "English"]);
    }

    #[test]
    fn test_multilingual_wins_over_bilingual() {
        let criteria = extract_criteria("bilingual or even multilingual");
        assert_eq!(criteria.languages, vec!["Italian", "English", "Spanish"]);

        let criteria = extract_criteria("speaks 3+ languages");
        assert_eq!(criteria.languages, vec!["Italian", "English", "Spanish"]);

        let criteria = extract_criteria("at least 2+ language");
        assert_eq!(criteria.languages, vec!["Italian", "English", "Spanish"]);
    }

    #[test]
    fn test_gpa_requires_decimal() {
        assert_eq!(extract_criteria("4 gpa").gpa_min, None);
        assert_eq!(extract_criteria("3.8gpa minimum").gpa_min, Some(3.8));
        assert_eq!(extract_criteria("gpa 3.5").gpa_min, None);
    }

    #[test]
    fn test_senior_overwrites_junior() {
        let criteria = extract_criteria("junior or senior developers");
        assert_eq!(criteria.experience_level, Some(ExperienceLevel::Senior));
        let criteria = extract_criteria("entry level role");
        assert_eq!(criteria.experience_level, Some(ExperienceLevel::Entry));
    }

    #[test]
    fn test_later_university_overwrites_earlier() {
        let criteria = extract_criteria("students from bologna or sapienza");
        assert_eq!(criteria.universities, vec!["Sapienza Università di Roma"]);
    }

    #[test]
    fn test_later_city_overwrites_earlier() {
        let criteria = extract_criteria("milan or naples, remote ok");
        assert_eq!(criteria.location.as_deref(), Some("Remote"));
        let criteria = extract_criteria("torino o firenze");
        assert_eq!(criteria.location.as_deref(), Some("Florence"));
    }

    #[test]
    fn test_availability_order() {
        let criteria = extract_criteria("asap, but open to offers");
        assert_eq!(criteria.availability, Some(Availability::OpenToOffers));
        let criteria = extract_criteria("available now");
        assert_eq!(criteria.availability, Some(Availability::Now));
    }

    #[test]
    fn test_graduation_year_pattern_overwrites_recent_grad() {
        assert_eq!(
            extract_criteria("recent grad").graduation_year.as_deref(),
            Some("2024")
        );
        assert_eq!(
            extract_criteria("new grad, class of 2026").graduation_year.as_deref(),
            Some("2026")
        );
        assert_eq!(extract_criteria("class of 2023").graduation_year, None);
        assert_eq!(extract_criteria("class of 2028").graduation_year, None);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let query = "Senior React developers in Rome, 3.2 GPA, fully verified";
        assert_eq!(extract_criteria(query), extract_criteria(query));
    }

    #[test]
    fn test_serializes_labels_and_omits_absent_fields() {
        let criteria = extract_criteria("senior, fully verified, asap");
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["experienceLevel"], "senior");
        assert_eq!(json["verificationLevel"], "100");
        assert_eq!(json["availability"], "Available immediately");
        assert!(json.get("location").is_none());
        assert!(json.get("gpaMin").is_none());
        assert_eq!(json["skills"], serde_json::json!([]));
    }

    #[test]
    fn test_top_university_after_polimi_uses_top_list() {
        let criteria = extract_criteria("top university grads from polimi");
        assert_eq!(
            criteria.universities,
            vec![
                "Politecnico di Milano",
                "Università Bocconi",
                "Sapienza Università di Roma"
            ]
        );
    }

    #[test]
    fn test_polimi_alone_maps_to_both_politecnici() {
        let criteria = extract_criteria("polimi");
        assert_eq!(
            criteria.universities,
            vec!["Politecnico di Milano", "Politecnico di Torino"]
        );
    }

    #[test]
    fn test_graduation_year_requires_word_boundaries() {
        assert_eq!(extract_criteria("class of2025").graduation_year, None);
        assert_eq!(
            extract_criteria("class of 2025").graduation_year.as_deref(),
            Some("2025")
        );
        assert_eq!(extract_criteria("20256").graduation_year, None);
    }
}
