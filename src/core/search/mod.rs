pub mod ghost;
pub mod matcher;

pub use matcher::{MatchOptions, SuggestionFilter, is_match};
