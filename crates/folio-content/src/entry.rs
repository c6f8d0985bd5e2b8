//! Navigation entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of entry groupings shown next to each palette row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Pages and sections of the site.
    Navigation,
    /// Profiles on other sites.
    Social,
    /// Documents such as the resume.
    Resources,
}

impl Category {
    /// Display label; also the text the palette filter matches against.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Social => "Social",
            Self::Resources => "Resources",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an entry leads, derived from its target string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// An absolute `http(s)` URL, opened outside the application.
    External(&'a str),
    /// An in-app path such as `/projects` or `/#skills`.
    Internal(&'a str),
}

impl<'a> Target<'a> {
    /// Classify a raw target string.
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::External(raw)
        } else {
            Self::Internal(raw)
        }
    }

    /// Whether the target leaves the application.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// A static, named, navigable target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    id: String,
    name: String,
    target: String,
    category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shortcut: Option<String>,
}

impl NavigationEntry {
    /// Create an entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target: target.into(),
            category,
            shortcut: None,
        }
    }

    /// Attach a shortcut hint shown beside the row (builder).
    #[must_use]
    pub fn with_shortcut(mut self, hint: impl Into<String>) -> Self {
        self.shortcut = Some(hint.into());
        self
    }

    /// Stable unique key.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw target string.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Classified target.
    #[must_use]
    pub fn destination(&self) -> Target<'_> {
        Target::classify(&self.target)
    }

    /// Grouping.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Optional shortcut hint.
    #[must_use]
    pub fn shortcut(&self) -> Option<&str> {
        self.shortcut.as_deref()
    }
}
