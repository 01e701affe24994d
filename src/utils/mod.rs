pub mod catalog;
pub mod fetch;
pub mod grades;
pub mod parser;
pub mod range;
pub mod report;
