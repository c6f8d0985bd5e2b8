#![forbid(unsafe_code)]

//! folio binary entry point.

use std::io;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use folio::app::{AppModel, Effect};
use folio::opener::SystemOpener;
use folio::{cli, logging, render};
use folio_assistant::{ConversationConfig, Responder, RuleTable};
use folio_content::Content;
use folio_core::terminal::{SessionOptions, TerminalSession};
use folio_palette::Navigator;

/// Longest wait for input before the loop re-checks bus signals.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(&opts.log_file) {
        eprintln!("Failed to open log file {}: {e}", opts.log_file.display());
        process::exit(1);
    }

    let content = match &opts.content {
        Some(path) => match Content::load(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Failed to load content from {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => Content::builtin(),
    };

    let responder = match &opts.rules {
        Some(path) => match RuleTable::load(path).and_then(|table| table.compile(content.profile())) {
            Ok(responder) => {
                tracing::info!(path = %path.display(), rules = responder.rules().len(), "rule table loaded");
                responder
            }
            Err(e) => {
                eprintln!("Failed to load rules from {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => Responder::for_profile(content.profile()),
    };

    if let Err(e) = run(&opts, content, responder) {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}

fn run(opts: &cli::Opts, content: Content, responder: Responder) -> io::Result<()> {
    let config = ConversationConfig::default().with_reply_delay(opts.reply_delay());
    let mut app = AppModel::with_responder(content, responder, config, opts.shortcut);
    let mut opener = opts.open_links.then(SystemOpener::new);
    let exit_at = opts.exit_after().map(|d| Instant::now() + d);

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        bracketed_paste: true,
    })?;
    tracing::info!(shortcut = %opts.shortcut, open_links = opts.open_links, "folio started");

    let mut stdout = io::stdout();
    loop {
        let now = Instant::now();
        app.tick(now);
        if exit_at.is_some_and(|at| now >= at) {
            tracing::info!("exit timer elapsed");
            break;
        }

        let (width, height) = session.size()?;
        render::draw(&mut stdout, &app.view(width, height), width, height)?;

        let timeout = [app.next_deadline(), exit_at]
            .into_iter()
            .flatten()
            .min()
            .map_or(IDLE_POLL, |at| at.saturating_duration_since(now).min(IDLE_POLL));
        if !session.poll_event(timeout)? {
            continue;
        }
        let Some(event) = session.read_event()? else {
            continue;
        };
        match app.update(&event, Instant::now()) {
            Some(Effect::Quit) => break,
            Some(Effect::Launch(request)) => {
                if let Some(opener) = opener.as_mut()
                    && let Err(e) = opener.navigate(&request)
                {
                    tracing::warn!(error = %e, url = request.target(), "could not open link");
                }
            }
            None => {}
        }
    }
    drop(session);

    if let Some(path) = &opts.transcript_out {
        export_transcript(&app, path)?;
    }
    tracing::info!("folio stopped");
    Ok(())
}

fn export_transcript(app: &AppModel, path: &Path) -> io::Result<()> {
    let Some(conversation) = app.assistant().conversation() else {
        tracing::info!("assistant closed at exit, no transcript written");
        return Ok(());
    };
    let json = conversation.transcript().to_json().map_err(io::Error::other)?;
    std::fs::write(path, json)?;
    tracing::info!(
        path = %path.display(),
        messages = conversation.transcript().len(),
        "transcript written"
    );
    Ok(())
}
