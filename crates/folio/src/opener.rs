#![forbid(unsafe_code)]

//! Hands external links to the platform opener.

use std::process::{Command, Stdio};

use folio_palette::{NavigateError, NavigationRequest, Navigator};

/// [`Navigator`] that launches `xdg-open`, `open` or `start` for external
/// links. Internal routes are rejected.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    program: Option<String>,
}

impl SystemOpener {
    /// Use the platform default opener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `program` instead of the platform default.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn command(&self, url: &str) -> Command {
        if let Some(program) = &self.program {
            let mut cmd = Command::new(program);
            cmd.arg(url);
            return cmd;
        }
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Navigator for SystemOpener {
    fn navigate(&mut self, request: &NavigationRequest) -> Result<(), NavigateError> {
        let NavigationRequest::OpenExternal { url, .. } = request else {
            return Err(NavigateError::Unsupported(request.target().to_string()));
        };
        self.command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!(url = %url, "external link launched");
        Ok(())
    }
}
