pub mod candidate;
pub mod response;

pub use candidate::{CandidateSummary, ProjectSummary};
pub use response::{CandidateSearchResponse, Pagination};
