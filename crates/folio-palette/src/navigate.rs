#![forbid(unsafe_code)]

//! Navigation side effects.
//!
//! Confirming a palette entry produces a [`NavigationRequest`]; the host
//! decides how to carry it out through a [`Navigator`]. Absolute `http(s)`
//! targets open outside the application, everything else is an in-app route.

use std::fmt;

use folio_content::{NavigationEntry, Target};

/// What confirming an entry asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Open an absolute URL in a new top-level context.
    OpenExternal {
        /// Id of the confirmed entry.
        entry_id: String,
        /// URL to open.
        url: String,
    },
    /// Change the in-app route.
    Route {
        /// Id of the confirmed entry.
        entry_id: String,
        /// Path to route to.
        path: String,
    },
}

impl NavigationRequest {
    /// The request for confirming `entry`.
    #[must_use]
    pub fn for_entry(entry: &NavigationEntry) -> Self {
        let entry_id = entry.id().to_string();
        match entry.destination() {
            Target::External(url) => Self::OpenExternal {
                entry_id,
                url: url.to_string(),
            },
            Target::Internal(path) => Self::Route {
                entry_id,
                path: path.to_string(),
            },
        }
    }

    /// Id of the confirmed entry.
    #[must_use]
    pub fn entry_id(&self) -> &str {
        match self {
            Self::OpenExternal { entry_id, .. } | Self::Route { entry_id, .. } => entry_id,
        }
    }

    /// URL or path.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::OpenExternal { url, .. } => url,
            Self::Route { path, .. } => path,
        }
    }

    /// Whether the request leaves the application.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::OpenExternal { .. })
    }
}

/// Errors from carrying out a navigation request.
#[derive(Debug)]
pub enum NavigateError {
    /// The navigator does not handle this kind of request.
    Unsupported(String),
    /// The external opener could not be launched.
    Launch(std::io::Error),
}

impl fmt::Display for NavigateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateError::Unsupported(target) => write!(f, "cannot navigate to {target}"),
            NavigateError::Launch(e) => write!(f, "failed to launch opener: {e}"),
        }
    }
}

impl std::error::Error for NavigateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigateError::Launch(e) => Some(e),
            NavigateError::Unsupported(_) => None,
        }
    }
}

impl From<std::io::Error> for NavigateError {
    fn from(e: std::io::Error) -> Self {
        NavigateError::Launch(e)
    }
}

/// Carries out navigation requests.
pub trait Navigator {
    /// Perform `request`.
    fn navigate(&mut self, request: &NavigationRequest) -> Result<(), NavigateError>;
}

/// Navigator that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    requests: Vec<NavigationRequest>,
}

impl RecordingNavigator {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[NavigationRequest] {
        &self.requests
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, request: &NavigationRequest) -> Result<(), NavigateError> {
        self.requests.push(request.clone());
        Ok(())
    }
}

/// In-app route history.
///
/// Starts at `/`. Only [`NavigationRequest::Route`] is accepted; external
/// requests are rejected with [`NavigateError::Unsupported`].
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router positioned at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: vec!["/".to_string()],
        }
    }

    /// Current path.
    #[must_use]
    pub fn current(&self) -> &str {
        self.history.last().map_or("/", String::as_str)
    }

    /// Every visited path, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Return to the previous path. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    /// Push `path` unless it is already current.
    pub fn push(&mut self, path: &str) {
        if self.current() != path {
            self.history.push(path.to_string());
        }
    }
}

impl Navigator for Router {
    fn navigate(&mut self, request: &NavigationRequest) -> Result<(), NavigateError> {
        match request {
            NavigationRequest::Route { path, .. } => {
                self.push(path);
                tracing::debug!(path = %path, depth = self.history.len(), "route changed");
                Ok(())
            }
            NavigationRequest::OpenExternal { url, .. } => {
                Err(NavigateError::Unsupported(url.clone()))
            }
        }
    }
}
