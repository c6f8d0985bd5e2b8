#![forbid(unsafe_code)]

//! Command-line argument parsing for the folio console.
//!
//! Parses args by hand. Every option has a `FOLIO_*` environment override;
//! explicit flags win over the environment.

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use folio_core::KeyChord;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const HELP_TEXT: &str = "\
folio - portfolio console with a command palette and assistant

USAGE:
    folio [OPTIONS]

OPTIONS:
    --content=PATH          Load pages, profile and suggestions from a JSON file
    --rules=PATH            Load assistant rules from a JSON file
    --transcript-out=PATH   Write the assistant transcript as JSON on exit
    --reply-delay-ms=N      Assistant typing delay in milliseconds (default: 1200)
    --shortcut=CHORD        Palette shortcut, e.g. ctrl+k or alt+p (default: ctrl+k)
    --log-file=PATH         Log destination (default: folio.log)
    --open-links            Hand external links to the system opener
    --exit-after-ms=N       Quit after N milliseconds (for testing)
    --help, -h              Show this help message
    --version, -V           Show version

KEYBINDINGS:
    Ctrl+K            Open or close the command palette
    Ctrl+A            Open or close the assistant
    Tab               Cycle suggestion chips (assistant)
    Enter             Send input, or the highlighted chip when input is empty
    Backspace         Go back (page view)
    q / Ctrl+C        Quit

ENVIRONMENT VARIABLES:
    FOLIO_CONTENT           Override --content
    FOLIO_RULES             Override --rules
    FOLIO_REPLY_DELAY_MS    Override --reply-delay-ms
    FOLIO_SHORTCUT          Override --shortcut
    FOLIO_LOG_FILE          Override --log-file
    FOLIO_EXIT_AFTER_MS     Override --exit-after-ms
    FOLIO_LOG               Log filter directives (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Content file replacing the built-in table.
    pub content: Option<PathBuf>,
    /// Assistant rule table replacing the built-in rules.
    pub rules: Option<PathBuf>,
    /// Where to write the transcript on exit.
    pub transcript_out: Option<PathBuf>,
    /// Assistant typing delay in milliseconds.
    pub reply_delay_ms: u64,
    /// Palette toggle shortcut.
    pub shortcut: KeyChord,
    /// Log file path.
    pub log_file: PathBuf,
    /// Whether external links are launched.
    pub open_links: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            content: None,
            rules: None,
            transcript_out: None,
            reply_delay_ms: 1200,
            shortcut: KeyChord::palette_default(),
            log_file: PathBuf::from("folio.log"),
            open_links: false,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version` or invalid input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("folio {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `env`.
    ///
    /// Malformed environment values are ignored; malformed flags are errors.
    pub fn parse_from<S, F>(args: &[S], env: F) -> Result<Parsed, String>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = env("FOLIO_CONTENT") {
            opts.content = Some(PathBuf::from(val));
        }
        if let Some(val) = env("FOLIO_RULES") {
            opts.rules = Some(PathBuf::from(val));
        }
        if let Some(val) = env("FOLIO_REPLY_DELAY_MS")
            && let Ok(n) = val.parse()
        {
            opts.reply_delay_ms = n;
        }
        if let Some(val) = env("FOLIO_SHORTCUT")
            && let Ok(chord) = val.parse()
        {
            opts.shortcut = chord;
        }
        if let Some(val) = env("FOLIO_LOG_FILE") {
            opts.log_file = PathBuf::from(val);
        }
        if let Some(val) = env("FOLIO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--open-links" => opts.open_links = true,
                other => {
                    if let Some(val) = other.strip_prefix("--content=") {
                        opts.content = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--rules=") {
                        opts.rules = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--transcript-out=") {
                        opts.transcript_out = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--reply-delay-ms=") {
                        opts.reply_delay_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --reply-delay-ms value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--shortcut=") {
                        opts.shortcut = val
                            .parse()
                            .map_err(|e| format!("Invalid --shortcut value {val:?}: {e}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Parsed::Run(opts))
    }

    /// Typing delay as a [`Duration`].
    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Auto-exit delay, if enabled.
    #[must_use]
    pub fn exit_after(&self) -> Option<Duration> {
        (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms))
    }
}
