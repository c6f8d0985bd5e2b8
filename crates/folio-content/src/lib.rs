#![forbid(unsafe_code)]

//! The knowledge table behind the folio console.
//!
//! [`Content`] bundles everything the palette and the assistant read but
//! never write: the navigation entries, the profile used to fill canned
//! answers, and the suggestion chips. A built-in table ships with the crate
//! and can be replaced by a JSON document with the same shape.
//!
//! # Invariants
//!
//! 1. Entry ids are unique within a table.
//! 2. Entry names and the profile name are non-empty.
//! 3. Nothing mutates a table after [`Content::builtin`] or
//!    [`Content::from_json_str`] returns it.

mod builtin;
pub mod entry;
pub mod error;
pub mod profile;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use entry::{Category, NavigationEntry, Target};
pub use error::{ContentError, ContentResult};
pub use profile::{Experience, Profile, Project};

/// The complete static table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    entries: Vec<NavigationEntry>,
    profile: Profile,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl Content {
    /// Build a table from parts, checking the table invariants.
    pub fn new(
        entries: Vec<NavigationEntry>,
        profile: Profile,
        suggestions: Vec<String>,
    ) -> ContentResult<Self> {
        let content = Self {
            entries,
            profile,
            suggestions,
        };
        content.validate()?;
        Ok(content)
    }

    /// The table shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: builtin::entries(),
            profile: builtin::profile(),
            suggestions: builtin::suggestions(),
        }
    }

    /// Parse a table from JSON.
    pub fn from_json_str(json: &str) -> ContentResult<Self> {
        let content: Self = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// Read and parse a JSON table from disk.
    pub fn load(path: impl AsRef<Path>) -> ContentResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let content = Self::from_json_str(&json)?;
        #[cfg(feature = "tracing")]
        tracing::info!(
            path = %path.display(),
            entries = content.entries.len(),
            "content table loaded"
        );
        Ok(content)
    }

    /// Navigation entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&NavigationEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// The entry whose target is exactly `target`, if any.
    #[must_use]
    pub fn entry_for_target(&self, target: &str) -> Option<&NavigationEntry> {
        self.entries.iter().find(|e| e.target() == target)
    }

    /// Profile used by canned answers.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Suggestion chips offered by the assistant.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    fn validate(&self) -> ContentResult<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.id().trim().is_empty() {
                return Err(ContentError::EmptyField("entry id".into()));
            }
            if entry.name().trim().is_empty() {
                return Err(ContentError::EmptyField(format!("name of entry `{}`", entry.id())));
            }
            if !seen.insert(entry.id()) {
                return Err(ContentError::DuplicateId(entry.id().to_string()));
            }
        }
        if self.profile.name.trim().is_empty() {
            return Err(ContentError::EmptyField("profile name".into()));
        }
        Ok(())
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_table_is_valid() {
        let content = Content::builtin();
        assert!(content.validate().is_ok());
        assert_eq!(content.entries().len(), 11);
        assert_eq!(content.entries()[0].name(), "Home");
        assert_eq!(content.suggestions().len(), 4);
    }

    #[test]
    fn lookup_by_id_and_target() {
        let content = Content::builtin();
        assert_eq!(content.entry("projects").unwrap().target(), "/projects");
        assert_eq!(content.entry_for_target("/blog").unwrap().id(), "blog");
        assert!(content.entry("nope").is_none());
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let content = Content::builtin();
        let json = serde_json::to_string(&content).unwrap();
        let parsed = Content::from_json_str(&json).unwrap();
        assert_eq!(parsed, content);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let entries = vec![
            NavigationEntry::new("home", "Home", "/", Category::Navigation),
            NavigationEntry::new("home", "Start", "/start", Category::Navigation),
        ];
        let err = Content::new(entries, builtin::profile(), vec![]).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId(id) if id == "home"));
    }

    #[test]
    fn empty_name_rejected() {
        let entries = vec![NavigationEntry::new("x", "  ", "/", Category::Navigation)];
        let err = Content::new(entries, builtin::profile(), vec![]).unwrap_err();
        assert!(matches!(err, ContentError::EmptyField(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Content::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }

    #[test]
    fn suggestions_default_to_empty() {
        let json = r#"{
            "entries": [{"id": "home", "name": "Home", "target": "/", "category": "Navigation"}],
            "profile": {"name": "Ada", "role": "Engineer", "about": "", "skills": [],
                        "projects": [], "experience": [], "email": "ada@example.com"}
        }"#;
        let content = Content::from_json_str(json).unwrap();
        assert!(content.suggestions().is_empty());
        assert_eq!(content.profile().name, "Ada");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Content::builtin()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let content = Content::load(file.path()).unwrap();
        assert_eq!(content.entries().len(), 11);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Content::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ContentError::Io(_)));
    }
}
