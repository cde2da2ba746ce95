pub mod candidate;
pub mod config;
pub mod error;
pub mod search;

pub use candidate::{Candidate, InitialValue};
pub use config::AutocompleteConfig;
pub use error::{ConfigError, LookupError};
