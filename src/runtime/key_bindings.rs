use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Named keyboard actions of the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    ArrowUp,
    ArrowDown,
    ArrowRight,
    Enter,
    Escape,
}

impl KeyAction {
    /// Pure navigation keys never trigger a refetch.
    pub fn is_navigation(self) -> bool {
        matches!(self, Self::ArrowUp | Self::ArrowDown | Self::ArrowRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, KeyAction>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::key(KeyCode::Up), KeyAction::ArrowUp);
        self.bind(KeyBinding::key(KeyCode::Down), KeyAction::ArrowDown);
        self.bind(KeyBinding::key(KeyCode::Right), KeyAction::ArrowRight);
        self.bind(KeyBinding::key(KeyCode::Enter), KeyAction::Enter);
        self.bind(KeyBinding::key(KeyCode::Esc), KeyAction::Escape);

        // legacy aliases
        self.bind(KeyBinding::ctrl(KeyCode::Char('p')), KeyAction::ArrowUp);
        self.bind(KeyBinding::ctrl(KeyCode::Char('n')), KeyAction::ArrowDown);
    }
}
