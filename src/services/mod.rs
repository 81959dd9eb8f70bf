pub mod fan_out;
pub mod gallery;
pub mod llm;
pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod reply_parser;

pub use recommendations::{CategoryPolicy, MissingCategory, RecommendationService};
