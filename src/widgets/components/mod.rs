pub mod autocomplete;
pub mod scroll;

pub use autocomplete::{
    Autocomplete, LookupResponse, SuggestionLookup, SuggestionResolver, SuggestionSource,
};
pub use scroll::ListViewport;
