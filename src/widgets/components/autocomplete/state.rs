use super::Autocomplete;
use crate::core::candidate::Candidate;
use crate::core::search::ghost::ghost_text;
use crate::runtime::event::{AutocompleteEvent, HostEffect};
use crate::runtime::key_bindings::KeyAction;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::inputs::text_edit;

impl Autocomplete {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = self.bindings.resolve(key) {
            // Right only completes at the end of the text; elsewhere it moves
            // the cursor like Left.
            if action == KeyAction::ArrowRight
                && text_edit::move_right(&mut self.cursor, &self.text)
            {
                self.process_change_text(true);
                return true;
            }
            self.dispatch(action);
            return true;
        }
        if self.apply_edit(key) {
            self.process_change_text(true);
            return true;
        }
        false
    }

    fn dispatch(&mut self, action: KeyAction) {
        tracing::trace!(?action, highlighted = self.highlighted, "key action");
        if action.is_navigation() {
            self.process_change_text(false);
        }
        match action {
            KeyAction::Enter => self.enter_action(),
            KeyAction::Escape => self.escape_action(),
            KeyAction::ArrowUp => self.arrow_up_action(),
            KeyAction::ArrowDown => self.arrow_down_action(),
            KeyAction::ArrowRight => self.arrow_right_action(),
        }
    }

    /// Applies an editing key to the text value. Returns whether `key` is an
    /// editing key, changed or not.
    fn apply_edit(&mut self, key: KeyEvent) -> bool {
        let plain = !key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('w') if key.modifiers == KeyModifiers::CONTROL => {
                text_edit::delete_word_left(&mut self.text, &mut self.cursor);
            }
            KeyCode::Char(ch) if plain && !ch.is_control() => {
                text_edit::insert_char(&mut self.text, &mut self.cursor, ch);
            }
            KeyCode::Backspace if plain => {
                text_edit::backspace_char(&mut self.text, &mut self.cursor);
            }
            KeyCode::Delete if plain => {
                text_edit::delete_char(&mut self.text, &mut self.cursor);
            }
            KeyCode::Left if plain => {
                text_edit::move_left(&mut self.cursor, &self.text);
            }
            KeyCode::Home => {
                text_edit::move_home(&mut self.cursor);
            }
            KeyCode::End => {
                text_edit::move_end(&mut self.cursor, &self.text);
            }
            _ => return false,
        }
        true
    }

    /// Reaction to a changed text value. `refetch` is false for pure
    /// navigation keys.
    pub(super) fn process_change_text(&mut self, refetch: bool) {
        if self.config.select_on_exact && self.on_exact() {
            return;
        }
        self.emit(AutocompleteEvent::Input(self.text.clone()));
        self.input_changed = true;
        self.list_visible = true;
        if refetch {
            self.clear_all();
            self.find_suggestions();
        }
    }

    // --- resolution ---

    pub(super) fn find_suggestions(&mut self) {
        let chosen_label = self
            .chosen
            .as_ref()
            .and_then(|chosen| chosen.label(&self.config.suggestion_attribute))
            .map(str::to_string);
        if let Some(candidates) =
            self.resolver
                .request(&self.text, chosen_label.as_deref(), self.now)
        {
            self.apply_candidates(candidates);
        }
    }

    pub(super) fn apply_candidates(&mut self, candidates: Vec<Candidate>) {
        self.visible.clear();
        for candidate in &candidates {
            self.filter.admit(&mut self.visible, candidate, &self.text);
        }
        tracing::debug!(
            text = %self.text,
            offered = candidates.len(),
            visible = self.visible.len(),
            "suggestions filtered"
        );

        self.highlighted = 0;
        let is_exact = self.config.select_on_exact && self.on_exact();
        if !is_exact && !self.config.suggest_on_all_words {
            self.set_placeholder_val();
        }
    }

    /// Selects the visible candidate whose label equals the text, if any.
    fn on_exact(&mut self) -> bool {
        let attribute = self.config.suggestion_attribute.as_str();
        let Some(index) = self
            .visible
            .iter()
            .position(|candidate| candidate.label(attribute) == Some(self.text.as_str()))
        else {
            return false;
        };

        self.highlighted = index;
        self.chosen = Some(self.visible[index].clone());
        self.clear_placeholder();
        self.select();
        if self.visible.len() <= 1 {
            self.list_visible = false;
        }
        true
    }

    // --- keyboard actions ---

    fn clamp_highlight(&mut self) {
        self.highlighted = self.highlighted.min(self.visible.len().saturating_sub(1));
    }

    fn arrow_down_action(&mut self) {
        self.clamp_highlight();
        if self.highlighted < self.visible.len().saturating_sub(1) {
            self.highlighted += 1;
            self.set_placeholder_and_text_val();
            self.request_effect(HostEffect::ScrollIntoView {
                index: self.highlighted,
                align_top: false,
            });
            self.emit(AutocompleteEvent::KeyDown(self.chosen.clone()));
        }
    }

    fn arrow_up_action(&mut self) {
        self.clamp_highlight();
        if self.highlighted > 0 {
            self.highlighted -= 1;
            self.set_placeholder_and_text_val();
            self.request_effect(HostEffect::ScrollIntoView {
                index: self.highlighted,
                align_top: true,
            });
            self.emit(AutocompleteEvent::KeyUp);
        } else {
            self.highlighted = 0;
        }
    }

    fn arrow_right_action(&mut self) {
        self.clamp_highlight();
        self.set_placeholder_and_text_val();
        self.emit(AutocompleteEvent::KeyRight);
    }

    fn enter_action(&mut self) {
        self.finalize_text_value();
        self.highlighted = 0;
        self.visible.clear();
        self.emit(AutocompleteEvent::Enter);
    }

    fn escape_action(&mut self) {
        self.highlighted = 0;
        self.visible.clear();
        self.chosen = None;
        self.request_effect(HostEffect::Blur);
        self.emit(AutocompleteEvent::Escape);
    }

    /// Picks the visible candidate at `index`. Callers check the bounds.
    pub(super) fn selected_action(&mut self, index: usize) {
        self.highlighted = index;
        self.finalize_text_value();
        self.clear_placeholder();
        self.visible.clear();
        self.select();
    }

    pub(super) fn reset_action(&mut self) {
        self.resolver.cancel();
        self.text.clear();
        self.cursor = 0;
        self.chosen = None;
        self.clear_placeholder();
        self.visible.clear();
        self.emit(AutocompleteEvent::Clear);
        self.select();
    }

    // --- shared steps ---

    fn finalize_text_value(&mut self) {
        let valid = self.visible.get(self.highlighted).is_some()
            || (self.placeholder.is_empty() && self.highlighted != 0);
        if valid {
            self.set_placeholder_and_text_val();
        } else {
            self.clear_all();
        }
    }

    fn set_placeholder_and_text_val(&mut self) {
        let Some(candidate) = self.visible.get(self.highlighted).cloned() else {
            return;
        };
        self.text = self.label_of(&candidate).to_string();
        self.cursor = text_edit::char_count(&self.text);
        self.set_placeholder_val();
        self.chosen = Some(candidate);
        self.select();
    }

    fn set_placeholder_val(&mut self) {
        if let Some(candidate) = self.visible.get(self.highlighted) {
            self.placeholder = ghost_text(self.label_of(candidate), &self.text);
        }
    }

    fn clear_all(&mut self) {
        self.chosen = None;
        self.clear_placeholder();
        self.visible.clear();
    }

    fn clear_placeholder(&mut self) {
        if self.text.is_empty() {
            self.visible.clear();
            self.placeholder = self.config.placeholder.clone();
        } else {
            self.placeholder.clear();
        }
    }

    /// Announces the chosen candidate, then the text.
    fn select(&mut self) {
        self.emit(AutocompleteEvent::Selected(self.chosen.clone()));
        self.emit(AutocompleteEvent::Input(self.text.clone()));
    }
}
