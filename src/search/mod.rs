// src/search/mod.rs
pub mod criteria;
pub mod query_params;
pub mod vocabulary;

pub use criteria::{
    extract_criteria, Availability, ExperienceLevel, SearchCriteria, VerificationLevel,
};
pub use query_params::{clamp_pagination, CandidateSearchParams};
pub use vocabulary::EXAMPLE_QUERIES;
