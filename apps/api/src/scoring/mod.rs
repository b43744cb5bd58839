//! FitScore core: context detection, resume parsing, the six category
//! scorers, red flags, aggregation, and optional AI augmentation.

pub mod aggregator;
pub mod augmenter;
pub mod context_detector;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod resume;
pub mod scorers;
pub mod tables;
pub mod text;
