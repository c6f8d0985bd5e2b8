#![forbid(unsafe_code)]

//! Command palette state machine.
//!
//! # Invariants
//!
//! 1. `matches` is recomputed, and the selection reset to the first row,
//!    every time the query changes.
//! 2. The selection is always in range for `matches` (see [`Selection`]).
//! 3. Closing, whether by confirmation, Escape, backdrop click, or the
//!    toggle shortcut, clears the query and selects the first row.
//! 4. Confirming with no matches is a no-op: no request, palette stays open.
//!
//! # Keys while open
//!
//! | Key | Effect |
//! |-----|--------|
//! | printable char | append to query |
//! | Backspace | drop last char |
//! | Ctrl+U | clear query |
//! | Up / Down | move selection, wrapping |
//! | Home / End | first / last row |
//! | Enter | confirm selected entry |
//! | Esc | dismiss |
//!
//! The toggle shortcut (Ctrl+K and Cmd+K by default) is honored whether the
//! palette is open or not. Everything else is ignored while closed.

use folio_content::NavigationEntry;
use folio_core::{Event, KeyChord, KeyCode, KeyEvent, Modifiers};

use crate::filter::filter_indices;
use crate::navigate::NavigationRequest;
use crate::selection::Selection;
use crate::text::truncate_to_width;

/// Outcome of an input event that the host must act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// An entry was confirmed; carry out the request.
    Navigate(NavigationRequest),
    /// The palette was closed without choosing anything.
    Dismiss,
}

/// Kind of a rendered palette row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// The query input line.
    Query,
    /// A match; `selected` marks the highlighted row.
    Item {
        /// Whether this row is the current selection.
        selected: bool,
    },
    /// Shown in place of items when nothing matches.
    Empty,
}

/// One line of palette output, already fitted to the requested width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRow {
    /// What the row represents.
    pub kind: RowKind,
    /// Row text.
    pub text: String,
}

/// Searchable, keyboard-driven launcher over a fixed entry list.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    entries: Vec<NavigationEntry>,
    shortcuts: Vec<KeyChord>,
    visible: bool,
    query: String,
    matches: Vec<usize>,
    selection: Selection,
}

impl CommandPalette {
    /// Create a closed palette over `entries`.
    #[must_use]
    pub fn new(entries: Vec<NavigationEntry>) -> Self {
        let matches: Vec<usize> = (0..entries.len()).collect();
        let selection = Selection::new(matches.len());
        let default = KeyChord::palette_default();
        let shortcuts = std::iter::once(default)
            .chain(default.super_variant())
            .collect();
        Self {
            entries,
            shortcuts,
            visible: false,
            query: String::new(),
            matches,
            selection,
        }
    }

    /// Use `chord` (and its Cmd variant, if it uses Ctrl) as the toggle (builder).
    #[must_use]
    pub fn with_shortcut(mut self, chord: KeyChord) -> Self {
        self.shortcuts = std::iter::once(chord).chain(chord.super_variant()).collect();
        self
    }

    /// The primary toggle shortcut.
    #[must_use]
    pub fn shortcut(&self) -> KeyChord {
        self.shortcuts
            .first()
            .copied()
            .unwrap_or_else(KeyChord::palette_default)
    }

    // --- Visibility ---

    /// Show the palette.
    pub fn open(&mut self) {
        if !self.visible {
            self.visible = true;
            tracing::debug!("palette opened");
        }
    }

    /// Hide the palette and reset query and selection.
    pub fn close(&mut self) {
        self.visible = false;
        self.reset_query();
        tracing::debug!("palette closed");
    }

    /// Open if closed, close (with reset) if open.
    pub fn toggle(&mut self) {
        if self.visible {
            self.close();
        } else {
            self.open();
        }
    }

    /// Whether the palette is showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Backdrop click: close without navigating.
    pub fn dismiss(&mut self) -> Option<PaletteAction> {
        if !self.visible {
            return None;
        }
        self.close();
        Some(PaletteAction::Dismiss)
    }

    // --- Query and matches ---

    /// Current query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and recompute matches.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// All entries, in source order.
    #[must_use]
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    /// Entries matching the current query, in source order.
    pub fn matches(&self) -> impl ExactSizeIterator<Item = &NavigationEntry> + '_ {
        self.matches.iter().map(|&i| &self.entries[i])
    }

    /// Number of matches.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Selected row index (0 when there are no matches).
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    /// The highlighted entry, if any.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&NavigationEntry> {
        self.selection
            .current()
            .and_then(|row| self.matches.get(row))
            .map(|&i| &self.entries[i])
    }

    // --- Pointer ---

    /// Highlight `row` (pointer hover). Out-of-range rows are ignored.
    pub fn hover(&mut self, row: usize) {
        if self.visible {
            self.selection.set(row);
        }
    }

    /// Confirm `row` directly (pointer click).
    pub fn activate(&mut self, row: usize) -> Option<PaletteAction> {
        if !self.visible || !self.selection.set(row) {
            return None;
        }
        self.confirm()
    }

    // --- Events ---

    /// Handle an input event.
    ///
    /// Returns an action when the host must navigate or learn the palette
    /// was dismissed. `None` means the event was consumed without an outcome
    /// or ignored.
    pub fn handle_event(&mut self, event: &Event) -> Option<PaletteAction> {
        if let Event::Key(key) = event
            && self.is_shortcut(key)
        {
            if self.visible {
                self.close();
                return Some(PaletteAction::Dismiss);
            }
            self.open();
            return None;
        }

        if !self.visible {
            return None;
        }

        match event {
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Paste(text) => {
                let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
                if !cleaned.is_empty() {
                    self.query.push_str(&cleaned);
                    self.refilter();
                }
                None
            }
            _ => None,
        }
    }

    /// Whether `key` is one of the toggle shortcuts.
    #[must_use]
    pub fn is_shortcut(&self, key: &KeyEvent) -> bool {
        self.shortcuts.iter().any(|chord| chord.matches(key))
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<PaletteAction> {
        match key.code {
            KeyCode::Escape => {
                self.close();
                return Some(PaletteAction::Dismiss);
            }
            KeyCode::Enter => return self.confirm(),
            KeyCode::Up => self.selection.prev(),
            KeyCode::Down => self.selection.next(),
            KeyCode::Home => self.selection.first(),
            KeyCode::End => self.selection.last(),
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(Modifiers::CTRL) {
                    if c == 'u' && !self.query.is_empty() {
                        self.query.clear();
                        self.refilter();
                    }
                } else if !key.modifiers.intersects(Modifiers::ALT | Modifiers::SUPER) {
                    self.query.push(c);
                    self.refilter();
                }
            }
            _ => {}
        }
        None
    }

    fn confirm(&mut self) -> Option<PaletteAction> {
        let request = NavigationRequest::for_entry(self.selected_entry()?);
        tracing::info!(
            entry = request.entry_id(),
            target = request.target(),
            external = request.is_external(),
            "palette navigation"
        );
        self.close();
        Some(PaletteAction::Navigate(request))
    }

    fn refilter(&mut self) {
        self.matches = filter_indices(&self.query, &self.entries);
        self.selection.reset(self.matches.len());
        tracing::trace!(query = %self.query, matches = self.matches.len(), "palette refiltered");
    }

    fn reset_query(&mut self) {
        self.query.clear();
        self.refilter();
    }

    // --- Rendering ---

    /// Palette rows fitted to `width` columns, at most `max_items` matches.
    ///
    /// The visible window scrolls so the selected row is always included.
    /// Returns nothing while closed.
    #[must_use]
    pub fn rows(&self, width: usize, max_items: usize) -> Vec<PaletteRow> {
        if !self.visible || width == 0 {
            return Vec::new();
        }
        let mut rows = Vec::with_capacity(max_items + 1);
        let query_line = if self.query.is_empty() {
            "> Search command or page...".to_string()
        } else {
            format!("> {}", self.query)
        };
        rows.push(PaletteRow {
            kind: RowKind::Query,
            text: truncate_to_width(&query_line, width).into_owned(),
        });

        if self.matches.is_empty() {
            rows.push(PaletteRow {
                kind: RowKind::Empty,
                text: truncate_to_width(&format!("No results for \"{}\"", self.query), width)
                    .into_owned(),
            });
            return rows;
        }

        let max_items = max_items.max(1);
        let selected = self.selection.index();
        let start = (selected + 1).saturating_sub(max_items);
        for (row, &idx) in self.matches.iter().enumerate().skip(start).take(max_items) {
            let entry = &self.entries[idx];
            let is_selected = row == selected;
            let marker = if is_selected { '>' } else { ' ' };
            let mut line = format!("{marker} {}  {}", entry.category().label(), entry.name());
            if let Some(hint) = entry.shortcut() {
                line.push_str("  ");
                line.push_str(hint);
            }
            rows.push(PaletteRow {
                kind: RowKind::Item {
                    selected: is_selected,
                },
                text: truncate_to_width(&line, width).into_owned(),
            });
        }
        rows
    }
}
