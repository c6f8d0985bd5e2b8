#![forbid(unsafe_code)]

//! Confirming an entry emits an `info` event carrying the entry id.

use std::sync::{Arc, Mutex};

use folio_content::Content;
use folio_core::{Event, KeyCode};
use folio_palette::CommandPalette;

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    entry: Option<String>,
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    entry: Option<String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "entry" {
            self.entry = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            entry: visitor.entry,
        });
    }
}

#[test]
fn navigation_is_logged_at_info() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });

    tracing::subscriber::with_default(subscriber, || {
        let mut palette = CommandPalette::new(Content::builtin().entries().to_vec());
        palette.open();
        palette.set_query("blog");
        palette.handle_event(&Event::key(KeyCode::Enter));
    });

    let events = events.lock().unwrap();
    let nav = events
        .iter()
        .find(|e| e.message == "palette navigation")
        .expect("navigation event recorded");
    assert_eq!(nav.level, tracing::Level::INFO);
    assert_eq!(nav.entry.as_deref(), Some("blog"));
}

#[test]
fn dismiss_does_not_log_navigation() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });

    tracing::subscriber::with_default(subscriber, || {
        let mut palette = CommandPalette::new(Content::builtin().entries().to_vec());
        palette.open();
        palette.handle_event(&Event::key(KeyCode::Escape));
    });

    let events = events.lock().unwrap();
    assert!(events.iter().all(|e| e.message != "palette navigation"));
}
