#![forbid(unsafe_code)]

//! Raw-mode terminal guard.
//!
//! A [`TerminalSession`] switches the terminal into the modes the console
//! needs and owns the obligation to switch them back. Restoration happens
//! when the session is dropped, from a panic hook, and (on Unix) from a
//! watcher thread that catches SIGINT/SIGTERM before exiting. Modes are
//! left in the reverse of the order they were entered.
//!
//! ```no_run
//! use folio_core::terminal::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions {
//!     alternate_screen: true,
//!     bracketed_paste: false,
//! })?;
//! let (cols, rows) = session.size()?;
//! drop(session);
//! # let _ = (cols, rows);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::Once;
use std::time::Duration;

use crossterm::{cursor, event as cte, execute, terminal};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::{Handle, Signals};

use crate::event::Event;

/// Optional modes entered on top of raw mode.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Draw on the alternate screen and hide the cursor.
    pub alternate_screen: bool,
    /// Report pastes as one [`Event::Paste`] instead of key events.
    pub bracketed_paste: bool,
}

/// A terminal mode the session has entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Raw,
    AlternateScreen,
    BracketedPaste,
}

impl Mode {
    /// Every mode, in entry order.
    const ALL: [Mode; 3] = [Mode::Raw, Mode::AlternateScreen, Mode::BracketedPaste];

    fn enter(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Mode::Raw => terminal::enable_raw_mode(),
            Mode::AlternateScreen => execute!(out, terminal::EnterAlternateScreen, cursor::Hide),
            Mode::BracketedPaste => execute!(out, cte::EnableBracketedPaste),
        }
    }

    fn leave(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Mode::Raw => terminal::disable_raw_mode(),
            Mode::AlternateScreen => execute!(out, cursor::Show, terminal::LeaveAlternateScreen),
            Mode::BracketedPaste => execute!(out, cte::DisableBracketedPaste),
        }
    }
}

/// Leave `modes` newest first, ignoring failures.
fn leave_all(modes: &[Mode]) {
    let mut out = io::stdout();
    for mode in modes.iter().rev() {
        let _ = mode.leave(&mut out);
    }
    let _ = out.flush();
}

/// Owns raw mode and the optional modes for its lifetime.
pub struct TerminalSession {
    options: SessionOptions,
    entered: Vec<Mode>,
    #[cfg(unix)]
    watcher: Option<SignalWatcher>,
}

impl std::fmt::Debug for TerminalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSession")
            .field("entered", &self.entered)
            .finish_non_exhaustive()
    }
}

impl TerminalSession {
    /// Enter raw mode plus whatever `options` asks for.
    ///
    /// On error, modes entered so far are left again before returning.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        let wanted: Vec<Mode> = Mode::ALL
            .into_iter()
            .filter(|mode| match mode {
                Mode::Raw => true,
                Mode::AlternateScreen => options.alternate_screen,
                Mode::BracketedPaste => options.bracketed_paste,
            })
            .collect();

        let mut session = Self {
            options,
            entered: Vec::with_capacity(wanted.len()),
            #[cfg(unix)]
            watcher: None,
        };
        let mut out = io::stdout();
        for mode in wanted {
            // Dropping `session` on the error path leaves what was entered.
            mode.enter(&mut out)?;
            session.entered.push(mode);
            #[cfg(feature = "tracing")]
            tracing::debug!(?mode, "terminal mode entered");
        }
        #[cfg(unix)]
        {
            session.watcher = Some(SignalWatcher::spawn()?);
        }
        #[cfg(feature = "tracing")]
        tracing::info!(modes = session.entered.len(), "terminal session started");
        Ok(session)
    }

    /// Terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait at most `timeout` for input. `Ok(true)` means [`read_event`](Self::read_event)
    /// will not block.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        cte::poll(timeout)
    }

    /// Read one event, blocking until input arrives.
    ///
    /// Input with no [`Event`] equivalent (mouse, for instance) yields `Ok(None)`.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        cte::read().map(Event::from_crossterm)
    }

    /// Options the session was opened with.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        #[cfg(unix)]
        drop(self.watcher.take());
        leave_all(&self.entered);
        self.entered.clear();
        #[cfg(feature = "tracing")]
        tracing::info!("terminal session restored");
    }
}

/// Chain a hook that restores every mode before the previous hook prints.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            leave_all(&Mode::ALL);
            previous(info);
        }));
    });
}

/// Background thread that restores the terminal on SIGINT/SIGTERM and exits.
#[cfg(unix)]
struct SignalWatcher {
    handle: Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalWatcher {
    fn spawn() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("folio-signals".into())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(signal, "terminating on signal");
                    leave_all(&Mode::ALL);
                    std::process::exit(128 + signal);
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
