#![forbid(unsafe_code)]

//! Reserved key chords.
//!
//! A [`KeyChord`] names one key plus the modifiers that must be held with it,
//! such as `Ctrl+K` for the command palette. Chords are parsed from short
//! strings (`"ctrl+k"`, `"cmd+k"`, `"alt+f1"`) so shortcuts can be configured
//! from the command line or the environment.
//!
//! # Matching rules
//!
//! 1. Only press and repeat events match; releases never do.
//! 2. Character keys compare case-insensitively (terminals report `Ctrl+K`
//!    as either `k` or `K` depending on the protocol).
//! 3. Ctrl, Alt and Super must match exactly. Shift is ignored for
//!    character keys because it is already folded into the character.

use std::fmt;
use std::str::FromStr;

use crate::event::{KeyCode, KeyEvent, Modifiers};

/// A key plus required modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key that completes the chord.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// Create a chord from a key and modifiers.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// `Ctrl+K`, the conventional command palette shortcut.
    #[must_use]
    pub const fn palette_default() -> Self {
        Self::new(KeyCode::Char('k'), Modifiers::CTRL)
    }

    /// The same key with `Super` (Cmd on macOS) in place of `Ctrl`.
    ///
    /// Returns `None` when the chord does not use `Ctrl`.
    #[must_use]
    pub fn super_variant(&self) -> Option<Self> {
        if !self.modifiers.contains(Modifiers::CTRL) {
            return None;
        }
        let modifiers = (self.modifiers - Modifiers::CTRL) | Modifiers::SUPER;
        Some(Self::new(self.code, modifiers))
    }

    /// Whether `event` triggers this chord.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !event.is_press() {
            return false;
        }
        let significant = Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER;
        match (self.code, event.code) {
            (KeyCode::Char(want), KeyCode::Char(got)) => {
                want.eq_ignore_ascii_case(&got)
                    && (event.modifiers & significant) == (self.modifiers & significant)
            }
            (want, got) => want == got && event.modifiers == self.modifiers,
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CTRL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(Modifiers::SUPER) {
            f.write_str("Cmd+")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Escape => f.write_str("Esc"),
            KeyCode::Tab => f.write_str("Tab"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Error returned when a chord string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyChordParseError {
    /// The input was empty or only separators.
    Empty,
    /// A modifier name was not recognized.
    UnknownModifier(String),
    /// The key name was not recognized.
    UnknownKey(String),
}

impl fmt::Display for KeyChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty key chord"),
            Self::UnknownModifier(m) => write!(f, "unknown modifier: {m}"),
            Self::UnknownKey(k) => write!(f, "unknown key: {k}"),
        }
    }
}

impl std::error::Error for KeyChordParseError {}

impl FromStr for KeyChord {
    type Err = KeyChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split('+')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let Some((key, mods)) = parts.split_last() else {
            return Err(KeyChordParseError::Empty);
        };

        let mut modifiers = Modifiers::NONE;
        for m in mods {
            modifiers |= match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => Modifiers::CTRL,
                "alt" | "option" | "opt" => Modifiers::ALT,
                "shift" => Modifiers::SHIFT,
                "cmd" | "command" | "super" | "meta" | "win" => Modifiers::SUPER,
                _ => return Err(KeyChordParseError::UnknownModifier((*m).to_string())),
            };
        }

        let lower = key.to_ascii_lowercase();
        let code = match lower.as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    (Some('f'), Some(_)) => match lower[1..].parse::<u8>() {
                        Ok(n) if (1..=24).contains(&n) => KeyCode::F(n),
                        _ => return Err(KeyChordParseError::UnknownKey((*key).to_string())),
                    },
                    _ => return Err(KeyChordParseError::UnknownKey((*key).to_string())),
                }
            }
        };

        Ok(Self::new(code, modifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEventKind;

    fn press(code: KeyCode, modifiers: Modifiers) -> KeyEvent {
        KeyEvent::new(code).with_modifiers(modifiers)
    }

    #[test]
    fn default_is_ctrl_k() {
        let chord = KeyChord::palette_default();
        assert!(chord.matches(&press(KeyCode::Char('k'), Modifiers::CTRL)));
        assert!(chord.matches(&press(KeyCode::Char('K'), Modifiers::CTRL)));
        assert!(!chord.matches(&press(KeyCode::Char('k'), Modifiers::NONE)));
        assert!(!chord.matches(&press(KeyCode::Char('j'), Modifiers::CTRL)));
    }

    #[test]
    fn extra_significant_modifier_does_not_match() {
        let chord = KeyChord::palette_default();
        assert!(!chord.matches(&press(
            KeyCode::Char('k'),
            Modifiers::CTRL | Modifiers::ALT
        )));
        // Shift folds into the character, so it is tolerated.
        assert!(chord.matches(&press(
            KeyCode::Char('K'),
            Modifiers::CTRL | Modifiers::SHIFT
        )));
    }

    #[test]
    fn release_never_matches() {
        let chord = KeyChord::palette_default();
        let release = press(KeyCode::Char('k'), Modifiers::CTRL).with_kind(KeyEventKind::Release);
        assert!(!chord.matches(&release));
    }

    #[test]
    fn super_variant_swaps_ctrl() {
        let chord = KeyChord::palette_default().super_variant().unwrap();
        assert_eq!(chord.modifiers, Modifiers::SUPER);
        assert!(chord.matches(&press(KeyCode::Char('k'), Modifiers::SUPER)));
        assert!(KeyChord::new(KeyCode::F(2), Modifiers::NONE).super_variant().is_none());
    }

    #[test]
    fn parse_common_forms() {
        assert_eq!("ctrl+k".parse(), Ok(KeyChord::palette_default()));
        assert_eq!(
            "Cmd + K".parse(),
            Ok(KeyChord::new(KeyCode::Char('k'), Modifiers::SUPER))
        );
        assert_eq!(
            "alt+f1".parse(),
            Ok(KeyChord::new(KeyCode::F(1), Modifiers::ALT))
        );
        assert_eq!(
            "ctrl+space".parse(),
            Ok(KeyChord::new(KeyCode::Char(' '), Modifiers::CTRL))
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<KeyChord>(), Err(KeyChordParseError::Empty));
        assert_eq!("+".parse::<KeyChord>(), Err(KeyChordParseError::Empty));
        assert_eq!(
            "hyper+k".parse::<KeyChord>(),
            Err(KeyChordParseError::UnknownModifier("hyper".into()))
        );
        assert_eq!(
            "ctrl+pgup".parse::<KeyChord>(),
            Err(KeyChordParseError::UnknownKey("pgup".into()))
        );
        assert!("f99".parse::<KeyChord>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let chord = KeyChord::palette_default();
        assert_eq!(chord.to_string(), "Ctrl+K");
        assert_eq!(chord.to_string().parse(), Ok(chord));
    }
}
