//! Instant-suggestion input.
//!
//! Keystrokes edit the text value; the resolver turns the text into candidate
//! lists, the match filter builds the visible list, and the selection state
//! machine moves the highlight and commits choices. Everything the host must
//! know leaves through [`InteractionResult`] as events and effects.

mod render;
mod resolver;
mod source;
mod state;

use crate::core::candidate::{Candidate, InitialValue};
use crate::core::config::AutocompleteConfig;
use crate::core::error::ConfigError;
use crate::core::search::SuggestionFilter;
use crate::runtime::event::{AutocompleteEvent, HostEffect};
use crate::runtime::key_bindings::KeyBindings;
use crate::terminal::{CursorPos, KeyEvent, PointerEvent};
use crate::widgets::base::WidgetBase;
use crate::widgets::inputs::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext,
};
use std::time::{Duration, Instant};

pub use resolver::SuggestionResolver;
pub use source::{LookupResponse, SuggestionLookup, SuggestionSource};

pub struct Autocomplete {
    base: WidgetBase,
    config: AutocompleteConfig,
    filter: SuggestionFilter,
    resolver: SuggestionResolver,
    bindings: KeyBindings,
    text: String,
    cursor: usize,
    placeholder: String,
    highlighted: usize,
    visible: Vec<Candidate>,
    chosen: Option<Candidate>,
    list_visible: bool,
    input_changed: bool,
    now: Instant,
    events: Vec<AutocompleteEvent>,
    effects: Vec<HostEffect>,
}

impl Autocomplete {
    /// Builds the widget and runs the first resolution for the initial text.
    /// Events produced here are delivered with the first result returned.
    pub fn new(
        config: AutocompleteConfig,
        source: SuggestionSource,
        value: impl Into<InitialValue>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let text = value.into().text(&config.suggestion_attribute);
        let cursor = text_edit::char_count(&text);
        let mut widget = Self {
            base: WidgetBase::new(config.name.clone(), ""),
            filter: SuggestionFilter::from_config(&config),
            resolver: SuggestionResolver::new(source, config.debounce()),
            bindings: KeyBindings::new(),
            placeholder: config.placeholder.clone(),
            config,
            text,
            cursor,
            highlighted: 0,
            visible: Vec::new(),
            chosen: None,
            list_visible: true,
            input_changed: false,
            now: Instant::now(),
            events: Vec::new(),
            effects: Vec::new(),
        };
        widget.find_suggestions();
        Ok(widget)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.base = WidgetBase::new(self.base.id().to_string(), label);
        self
    }

    pub fn with_key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    // --- host-facing state ---

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Placeholder to display, if any.
    pub fn placeholder(&self) -> Option<&str> {
        if !self.config.show_placeholder {
            return None;
        }
        if self.input_changed || self.text.is_empty() {
            return Some(&self.placeholder);
        }
        None
    }

    pub fn shows_list(&self) -> bool {
        self.config.show_autocomplete
            && self.list_visible
            && self.visible.len() >= self.config.min_match
    }

    pub fn visible(&self) -> &[Candidate] {
        &self.visible
    }

    pub fn visible_labels(&self) -> Vec<&str> {
        self.visible
            .iter()
            .map(|candidate| self.label_of(candidate))
            .collect()
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn chosen(&self) -> Option<&Candidate> {
        self.chosen.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.resolver.is_loading()
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn wants_focus(&self) -> bool {
        self.config.autofocus && !self.config.disabled
    }

    pub fn poll_timeout(&self, default_timeout: Duration) -> Duration {
        self.resolver.poll_timeout(self.now, default_timeout)
    }

    // --- host-driven updates ---

    /// Replaces the suggestion source and resolves against the current text.
    pub fn set_suggestions(&mut self, source: SuggestionSource) -> InteractionResult {
        self.resolver.set_source(source);
        self.find_suggestions();
        self.finish(true)
    }

    pub fn set_config(&mut self, config: AutocompleteConfig) -> Result<InteractionResult, ConfigError> {
        config.validate()?;
        if config.placeholder != self.config.placeholder && self.text.is_empty() {
            self.placeholder = config.placeholder.clone();
        }
        self.base.set_id(config.name.clone());
        self.filter = SuggestionFilter::from_config(&config);
        self.resolver.set_debounce(config.debounce());
        self.config = config;
        self.find_suggestions();
        Ok(self.finish(true))
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) -> InteractionResult {
        self.config.placeholder = placeholder.into();
        if self.text.is_empty() {
            self.placeholder = self.config.placeholder.clone();
        }
        self.finish(true)
    }

    /// Re-runs resolution and filtering for the current text.
    pub fn recompute(&mut self) -> InteractionResult {
        self.find_suggestions();
        self.finish(true)
    }

    /// Replaces the text as if the user had typed it.
    pub fn set_text(&mut self, text: impl Into<String>) -> InteractionResult {
        if self.config.disabled {
            return InteractionResult::ignored();
        }
        self.text = text.into();
        self.cursor = text_edit::char_count(&self.text);
        self.process_change_text(true);
        self.finish(true)
    }

    // --- pointer & commands ---

    /// Picks the visible candidate at `index`. Indices outside the visible
    /// list are ignored.
    pub fn select_index(&mut self, index: usize) -> InteractionResult {
        if self.config.disabled {
            return InteractionResult::ignored();
        }
        if index >= self.visible.len() {
            tracing::debug!(
                index,
                visible = self.visible.len(),
                "pick outside visible list ignored"
            );
            return InteractionResult::ignored();
        }
        self.selected_action(index);
        self.finish(true)
    }

    pub fn reset(&mut self) -> InteractionResult {
        self.reset_action();
        self.finish(true)
    }

    pub fn on_click_input(&mut self, pointer: PointerEvent) -> InteractionResult {
        if self.config.disabled {
            return InteractionResult::ignored();
        }
        self.list_visible = true;
        self.emit(AutocompleteEvent::ClickInput(pointer));
        self.finish(true)
    }

    /// The pointer went down outside the widget.
    pub fn on_click_outside(&mut self) -> InteractionResult {
        self.list_visible = false;
        self.finish(true)
    }

    pub fn on_button_click(&mut self) -> InteractionResult {
        if self.config.disabled {
            return InteractionResult::ignored();
        }
        self.emit(AutocompleteEvent::ClickButton(self.text.clone()));
        self.finish(true)
    }

    // --- internals shared by the state machine ---

    fn label_of<'a>(&self, candidate: &'a Candidate) -> &'a str {
        candidate
            .label(&self.config.suggestion_attribute)
            .unwrap_or_default()
    }

    fn emit(&mut self, event: AutocompleteEvent) {
        self.events.push(event);
    }

    fn request_effect(&mut self, effect: HostEffect) {
        self.effects.push(effect);
    }

    fn finish(&mut self, handled: bool) -> InteractionResult {
        let events = std::mem::take(&mut self.events);
        let effects = std::mem::take(&mut self.effects);
        InteractionResult {
            handled,
            request_render: handled || !events.is_empty() || !effects.is_empty(),
            events,
            effects,
        }
    }
}

impl Drawable for Autocomplete {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        render::draw(self, ctx)
    }
}

impl Interactive for Autocomplete {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.config.disabled {
            return InteractionResult::ignored();
        }
        let handled = self.handle_key(key);
        self.finish(handled)
    }

    fn on_tick(&mut self, now: Instant) -> InteractionResult {
        self.now = now;
        let settled = self.resolver.poll(now);
        let changed = settled.is_some();
        if let Some(candidates) = settled {
            self.apply_candidates(candidates);
        }
        let loading = self.resolver.is_loading();
        let mut result = self.finish(false);
        result.request_render |= changed || loading;
        result
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        render::cursor_pos(self)
    }
}
