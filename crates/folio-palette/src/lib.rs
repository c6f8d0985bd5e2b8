#![forbid(unsafe_code)]

//! Command palette for the folio console.
//!
//! The palette is split the way its behavior is tested:
//!
//! - [`filter`]: stable, case-insensitive substring filter over entries
//! - [`selection`]: wrapping selection index over the current matches
//! - [`palette`]: the [`CommandPalette`] state machine tying both to input
//! - [`navigate`]: what confirming an entry asks the host to do
//! - [`text`]: display-width helpers for drawing rows
//!
//! # Usage
//!
//! ```
//! use folio_content::Content;
//! use folio_core::{Event, KeyCode};
//! use folio_palette::{CommandPalette, NavigationRequest, PaletteAction};
//!
//! let mut palette = CommandPalette::new(Content::builtin().entries().to_vec());
//! palette.open();
//! palette.set_query("proj");
//! let action = palette.handle_event(&Event::key(KeyCode::Enter));
//! assert_eq!(
//!     action,
//!     Some(PaletteAction::Navigate(NavigationRequest::Route {
//!         entry_id: "projects".into(),
//!         path: "/projects".into(),
//!     }))
//! );
//! assert!(!palette.is_visible());
//! ```

pub mod filter;
pub mod navigate;
pub mod palette;
pub mod selection;
pub mod text;

pub use filter::{filter, filter_indices};
pub use navigate::{NavigateError, NavigationRequest, Navigator, RecordingNavigator, Router};
pub use palette::{CommandPalette, PaletteAction, PaletteRow, RowKind};
pub use selection::Selection;
