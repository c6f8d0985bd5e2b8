#![forbid(unsafe_code)]

//! Core input types and terminal lifecycle for the folio console.
//!
//! # Role in folio
//! `folio-core` sits at the bottom of the stack. It turns raw terminal input
//! into canonical [`Event`](event::Event)s, describes reserved key chords such
//! as the palette shortcut, and owns the raw-mode session guard used by the
//! binary. Nothing here knows about palettes, chat, or content.

pub mod chord;
pub mod event;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use chord::{KeyChord, KeyChordParseError};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
