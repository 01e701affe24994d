//! Extraction of VTU result pages into academic records, SGPA computation,
//! and concurrent batch fetching of result pages over a range of USNs.

pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use error::ResultError;
pub use models::{AcademicRecord, AggregateScore, GradeInfo, ResultFlag, SubjectEntry};
pub use utils::fetch::{fetch_batch, fetch_record, fetch_single, HttpResultSource, ResultSource};
pub use utils::grades::{aggregate, score_to_grade};
pub use utils::parser::extract;
pub use utils::range::{expand, MAX_BATCH};
