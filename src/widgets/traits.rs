use crate::runtime::event::{AutocompleteEvent, HostEffect};
use crate::terminal::{CursorPos, KeyEvent, TerminalSize};
use crate::ui::span::SpanLine;
use crate::widgets::components::scroll::ListViewport;
use std::time::Instant;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub focused: bool,
    pub terminal_size: TerminalSize,
    /// Window over the candidate list, owned by the host.
    pub viewport: ListViewport,
}

impl RenderContext {
    pub fn new(terminal_size: TerminalSize) -> Self {
        Self {
            focused: true,
            terminal_size,
            viewport: ListViewport::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: ListViewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Cursor position relative to the first line.
    pub cursor: Option<CursorPos>,
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

/// What a widget produced while handling one input.
#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub events: Vec<AutocompleteEvent>,
    pub effects: Vec<HostEffect>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive: Send {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// Advances the widget's clock; timers and pending work settle here.
    fn on_tick(&mut self, _now: Instant) -> InteractionResult {
        InteractionResult::ignored()
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }
}
