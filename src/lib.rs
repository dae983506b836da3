pub mod analyzers;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod labels;
pub mod max_scores;
pub mod output;
