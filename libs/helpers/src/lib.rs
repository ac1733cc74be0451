pub mod candidates;
pub mod dataset;
