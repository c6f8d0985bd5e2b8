#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Components consume [`Event`] rather than backend-specific types so that
//! palette and assistant logic can be driven by tests without a terminal.
//!
//! - Only the event shapes the console reacts to are represented
//! - `Modifiers` use bitflags for easy combination
//! - Unsupported backend events map to `None`

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Input the console reacts to, independent of the terminal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, repeat or release.
    Key(KeyEvent),

    /// Text pasted in one piece (bracketed paste).
    Paste(String),

    /// The terminal changed size.
    Resize {
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },

    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

impl Event {
    /// Shorthand for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Shorthand for a key press with modifiers.
    #[must_use]
    pub const fn key_with(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::Key(KeyEvent::new(code).with_modifiers(modifiers))
    }

    /// Convert a crossterm event into a canonical event.
    ///
    /// Returns `None` for events with no canonical representation.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => map_key_event(key).map(Event::Key),
            cte::Event::Paste(text) => Some(Event::Paste(text)),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            cte::Event::FocusGained => Some(Event::Focus(true)),
            cte::Event::FocusLost => Some(Event::Focus(false)),
            cte::Event::Mouse(_) => None,
        }
    }
}

/// One key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Held modifiers.
    pub modifiers: Modifiers,
    /// Press, repeat or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Replace the modifiers (builder).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the kind (builder).
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is a press (or auto-repeat) rather than a release.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Ctrl held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Cmd/Super held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }
}

/// Keys the console distinguishes. Anything else is dropped at the backend boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Printable character, already shifted.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab.
    BackTab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// `F1` to `F24`.
    F(u8),
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Pressed; also used when the terminal cannot tell.
    #[default]
    Press,
    /// Auto-repeat while held.
    Repeat,
    /// Released (only with keyboard enhancement).
    Release,
}

bitflags! {
    /// Modifier set. Meta and Hyper are reported as `SUPER`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Empty set.
        const NONE  = 0b0000;
        /// Shift.
        const SHIFT = 0b0001;
        /// Alt or Option.
        const ALT   = 0b0010;
        /// Control.
        const CTRL  = 0b0100;
        /// Cmd, Super, Meta or Hyper.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    use cte::KeyCode as Ct;
    let mapped = match code {
        Ct::Char(c) => KeyCode::Char(c),
        Ct::Enter => KeyCode::Enter,
        Ct::Esc => KeyCode::Escape,
        Ct::Backspace => KeyCode::Backspace,
        Ct::Tab => KeyCode::Tab,
        Ct::BackTab => KeyCode::BackTab,
        Ct::Delete => KeyCode::Delete,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(mapped)
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    const TABLE: [(cte::KeyModifiers, Modifiers); 6] = [
        (cte::KeyModifiers::SHIFT, Modifiers::SHIFT),
        (cte::KeyModifiers::ALT, Modifiers::ALT),
        (cte::KeyModifiers::CONTROL, Modifiers::CTRL),
        (cte::KeyModifiers::SUPER, Modifiers::SUPER),
        (cte::KeyModifiers::HYPER, Modifiers::SUPER),
        (cte::KeyModifiers::META, Modifiers::SUPER),
    ];
    TABLE
        .iter()
        .filter(|(from, _)| modifiers.contains(*from))
        .fold(Modifiers::NONE, |acc, (_, to)| acc | *to)
}
