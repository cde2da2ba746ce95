use crate::core::candidate::Candidate;
use crate::terminal::PointerEvent;

/// Notifications emitted by the widget to its host, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum AutocompleteEvent {
    /// The text value changed or was re-announced.
    Input(String),
    ClickInput(PointerEvent),
    /// The search button was pressed; carries the current text.
    ClickButton(String),
    Enter,
    KeyUp,
    KeyDown(Option<Candidate>),
    KeyRight,
    Clear,
    Escape,
    Selected(Option<Candidate>),
}

/// Capabilities the widget asks of its host. The widget never performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEffect {
    /// Bring the visible candidate at `index` into view.
    ScrollIntoView { index: usize, align_top: bool },
    /// Release keyboard focus.
    Blur,
}
