pub mod event;
pub mod key_bindings;
pub mod scheduler;

pub use event::{AutocompleteEvent, HostEffect};
pub use key_bindings::{KeyAction, KeyBinding, KeyBindings};
pub use scheduler::{Scheduler, SchedulerCommand};
