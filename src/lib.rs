pub mod core;
pub mod runtime;
pub mod task;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::{AutocompleteConfig, Candidate, ConfigError, InitialValue, LookupError};
pub use crate::runtime::{AutocompleteEvent, HostEffect, KeyAction, KeyBindings};
pub use crate::task::{LookupHandle, PendingLookup};
pub use crate::widgets::components::{
    Autocomplete, ListViewport, LookupResponse, SuggestionLookup, SuggestionSource,
};
pub use crate::widgets::traits::{Drawable, InteractionResult, Interactive, RenderContext};
