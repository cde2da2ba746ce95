pub mod pending;
pub mod run_state;

pub use pending::{LookupHandle, LookupResult, PendingLookup};
pub use run_state::{FetchRunState, FetchToken};
