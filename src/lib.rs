//! InTransparency recruiter search back end.
//!
//! The heart of the crate is [`search::extract_criteria`], which turns a
//! free-text recruiter query into [`search::SearchCriteria`] by matching it
//! against fixed vocabularies. The criteria are projected onto the query
//! string of the candidate search endpoint ([`search::CandidateSearchParams`])
//! and sent upstream by [`core::SearchClient`]. Student CSV exports are
//! validated by [`import::parse_students`]. The [`web`] module exposes all of
//! this over HTTP; the binary adds a command-line front end ([`cli`]).

pub mod cli;
pub mod core;
pub mod import;
pub mod search;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::core::{ConfigManager, SearchClient};
pub use import::{parse_students, ImportReport};
pub use search::{extract_criteria, CandidateSearchParams, SearchCriteria};
pub use web::start_web_server;
