pub mod dataset;
pub mod reporting;
