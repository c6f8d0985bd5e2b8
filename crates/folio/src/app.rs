#![forbid(unsafe_code)]

//! Application model: page routing, the palette overlay and the assistant panel.
//!
//! The model never touches the terminal. [`AppModel::update`] consumes one
//! input [`Event`] and may return an [`Effect`] for the host to carry out;
//! [`AppModel::tick`] advances timers; [`AppModel::view`] describes the
//! screen as styled lines.
//!
//! # Input routing
//!
//! 1. `Ctrl+C` always quits.
//! 2. The palette sees every event first. While it is open it consumes all
//!    input; its toggle shortcut works from anywhere.
//! 3. `Ctrl+A` publishes [`SessionSignal::Toggle`] on the assistant bus.
//! 4. With the assistant open, keys edit the chat input. Otherwise they
//!    drive the page (`q` quits, Backspace goes back).

use std::sync::Arc;
use std::time::Instant;

use folio_assistant::{
    AssistantSession, ConversationConfig, Responder, Role, SessionSignal, SignalBus,
};
use folio_content::{Content, NavigationEntry};
use folio_core::{Event, KeyChord, KeyCode, KeyEvent, Modifiers};
use folio_palette::text::wrap;
use folio_palette::{CommandPalette, NavigationRequest, Navigator, PaletteAction, RowKind, Router};

/// Maximum palette matches shown at once.
const PALETTE_ITEMS: usize = 8;

const KEY_HINTS: &str = "Ctrl+K search  Ctrl+A assistant  q quit";

/// Something the host must do on the model's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the event loop.
    Quit,
    /// Open an external link.
    Launch(NavigationRequest),
}

/// Visual role of a line; the renderer maps these to terminal attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Body,
    Divider,
    User,
    Assistant,
    Typing,
    Chip { selected: bool },
    Input,
    Status,
    PaletteQuery,
    PaletteItem { selected: bool },
    PaletteEmpty,
}

/// One styled line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub style: LineStyle,
    pub text: String,
}

impl Line {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Everything the renderer draws for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Page and assistant panel, top to bottom.
    pub body: Vec<Line>,
    /// Palette rows drawn over the body, empty when the palette is closed.
    pub overlay: Vec<Line>,
    /// Bottom status bar.
    pub status: Line,
}

/// Top-level application state.
pub struct AppModel {
    content: Content,
    palette: CommandPalette,
    router: Router,
    bus: SignalBus<SessionSignal>,
    assistant: AssistantSession,
    input: String,
    chip: usize,
    status: String,
}

impl AppModel {
    /// Build the model over `content` with the built-in assistant rules.
    ///
    /// `config.greeting` is filled with the default greeting when unset.
    pub fn new(content: Content, config: ConversationConfig, shortcut: KeyChord) -> Self {
        let responder = Responder::for_profile(content.profile());
        Self::with_responder(content, responder, config, shortcut)
    }

    /// Build the model with a caller-supplied responder.
    pub fn with_responder(
        content: Content,
        responder: Responder,
        mut config: ConversationConfig,
        shortcut: KeyChord,
    ) -> Self {
        if config.greeting.is_none() {
            config.greeting = Some(greeting_for(&content));
        }
        let responder = Arc::new(responder);
        let bus = SignalBus::new();
        let assistant = AssistantSession::new(responder, config, &bus);
        let palette = CommandPalette::new(content.entries().to_vec()).with_shortcut(shortcut);
        let status = format!("Press {} to search", palette.shortcut());
        Self {
            content,
            palette,
            router: Router::new(),
            bus,
            assistant,
            input: String::new(),
            chip: 0,
            status,
        }
    }

    /// Handle to the assistant signal bus, for other publishers.
    #[must_use]
    pub fn bus(&self) -> SignalBus<SessionSignal> {
        self.bus.clone()
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    #[must_use]
    pub fn assistant(&self) -> &AssistantSession {
        &self.assistant
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn selected_chip(&self) -> Option<&str> {
        self.content.suggestions().get(self.chip).map(String::as_str)
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// When the model next needs a [`tick`](Self::tick) without input.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.assistant.next_deadline()
    }

    /// Apply bus signals and land due replies. Returns replies appended.
    pub fn tick(&mut self, now: Instant) -> usize {
        if self.assistant.process_signals(now) > 0 {
            self.after_assistant_change();
        }
        self.assistant.poll(now)
    }

    /// Handle one input event.
    pub fn update(&mut self, event: &Event, now: Instant) -> Option<Effect> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.ctrl()
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            return Some(Effect::Quit);
        }

        let palette_was_open = self.palette.is_visible();
        let action = self.palette.handle_event(event);
        if palette_was_open || self.palette.is_visible() {
            return action.and_then(|action| self.apply_palette_action(action));
        }

        match event {
            Event::Key(key) if key.is_press() => {
                if key.ctrl() && matches!(key.code, KeyCode::Char('a' | 'A')) {
                    self.bus.publish(SessionSignal::Toggle);
                    self.tick(now);
                    None
                } else if self.assistant.is_open() {
                    self.assistant_key(key, now);
                    None
                } else {
                    self.page_key(key)
                }
            }
            Event::Paste(text) if self.assistant.is_open() => {
                self.input.extend(text.chars().filter(|c| !c.is_control()));
                None
            }
            _ => None,
        }
    }

    fn apply_palette_action(&mut self, action: PaletteAction) -> Option<Effect> {
        let PaletteAction::Navigate(request) = action else {
            return None;
        };
        if request.is_external() {
            self.status = format!("External link: {}", request.target());
            return Some(Effect::Launch(request));
        }
        match self.router.navigate(&request) {
            Ok(()) => self.status = format!("Opened {}", request.target()),
            Err(err) => self.status = err.to_string(),
        }
        None
    }

    fn page_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => Some(Effect::Quit),
            KeyCode::Backspace | KeyCode::Left => {
                if self.router.back() {
                    self.status = format!("Back to {}", self.router.current());
                }
                None
            }
            _ => None,
        }
    }

    fn assistant_key(&mut self, key: &KeyEvent, now: Instant) {
        let chips = self.content.suggestions().len();
        match key.code {
            KeyCode::Escape => {
                self.bus.publish(SessionSignal::Close);
                self.tick(now);
            }
            KeyCode::Tab if chips > 0 => self.chip = (self.chip + 1) % chips,
            KeyCode::BackTab if chips > 0 => self.chip = (self.chip + chips - 1) % chips,
            KeyCode::Enter => {
                let text = if self.input.trim().is_empty() {
                    self.selected_chip().map(str::to_string)
                } else {
                    Some(std::mem::take(&mut self.input))
                };
                if let Some(text) = text {
                    self.assistant.submit(&text, now);
                }
                self.input.clear();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('u') if key.ctrl() => self.input.clear(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER) =>
            {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn after_assistant_change(&mut self) {
        self.input.clear();
        self.chip = 0;
        self.status = if self.assistant.is_open() {
            "Assistant open (Esc to close)".to_string()
        } else {
            "Assistant closed".to_string()
        };
    }

    // --- View ---

    /// Describe the screen for a `width` x `height` terminal.
    #[must_use]
    pub fn view(&self, width: u16, height: u16) -> Screen {
        let width = usize::from(width).max(1);
        let available = usize::from(height).saturating_sub(1);

        let mut body = self.page_lines(width);
        if let Some(conversation) = self.assistant.conversation() {
            body.push(Line::new(LineStyle::Divider, divider("Assistant", width)));
            for message in conversation.transcript() {
                let (style, label) = match message.role() {
                    Role::User => (LineStyle::User, "You"),
                    Role::Assistant => (LineStyle::Assistant, "Assistant"),
                };
                let text = format!("{label}: {}", message.text());
                body.extend(wrap(&text, width).into_iter().map(|l| Line::new(style, l)));
            }
            if conversation.is_pending() {
                body.push(Line::new(LineStyle::Typing, "Assistant is typing..."));
            }
            for (i, chip) in self.content.suggestions().iter().enumerate() {
                body.push(Line::new(
                    LineStyle::Chip {
                        selected: i == self.chip,
                    },
                    format!("[{chip}]"),
                ));
            }
            body.push(Line::new(LineStyle::Input, format!("> {}_", self.input)));
        }
        // Keep the bottom of the panel (input line) in view.
        if body.len() > available {
            body.drain(..body.len() - available);
        }

        let overlay = self
            .palette
            .rows(width.saturating_sub(4), PALETTE_ITEMS)
            .into_iter()
            .map(|row| {
                let style = match row.kind {
                    RowKind::Query => LineStyle::PaletteQuery,
                    RowKind::Item { selected } => LineStyle::PaletteItem { selected },
                    RowKind::Empty => LineStyle::PaletteEmpty,
                };
                Line::new(style, row.text)
            })
            .collect();

        let status = Line::new(LineStyle::Status, format!("{}  |  {KEY_HINTS}", self.status));
        Screen {
            body,
            overlay,
            status,
        }
    }

    fn page_lines(&self, width: usize) -> Vec<Line> {
        let path = self.router.current();
        let entry = self.content.entry_for_target(path);
        let title = entry.map_or("Not found", NavigationEntry::name);
        let mut lines = vec![
            Line::new(LineStyle::Title, format!("{title}  ({path})")),
            Line::new(LineStyle::Divider, "-".repeat(width)),
        ];
        let paragraphs = match entry {
            Some(entry) => self.page_body(entry),
            None => vec![format!("No page at {path}.")],
        };
        for paragraph in paragraphs {
            lines.extend(
                wrap(&paragraph, width)
                    .into_iter()
                    .map(|l| Line::new(LineStyle::Body, l)),
            );
        }
        lines
    }

    fn page_body(&self, entry: &NavigationEntry) -> Vec<String> {
        let profile = self.content.profile();
        match entry.id() {
            "home" => vec![
                format!("{}, {}", profile.name, profile.role),
                format!(
                    "Press {} to jump anywhere, or Ctrl+A to ask the assistant.",
                    self.palette.shortcut()
                ),
            ],
            "about" => vec![profile.about.clone()],
            "projects" => profile
                .projects
                .iter()
                .map(|p| format!("{} ({}): {}", p.title, p.category, p.description))
                .collect(),
            "skills" => vec![profile.skills.join(", ")],
            "experience" => profile
                .experience
                .iter()
                .map(|e| format!("{}, {} ({})", e.role, e.company, e.period))
                .collect(),
            "contact" => vec![format!("Email: {}", profile.email)],
            _ => vec![format!("{} ({})", entry.name(), entry.category())],
        }
    }
}

fn greeting_for(content: &Content) -> String {
    format!(
        "Hi! I'm {}'s assistant. Ask me anything about the work shown here.",
        content.profile().first_name()
    )
}

fn divider(label: &str, width: usize) -> String {
    let head = format!("-- {label} ");
    let fill = width.saturating_sub(head.chars().count());
    format!("{head}{}", "-".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> AppModel {
        AppModel::new(
            Content::builtin(),
            ConversationConfig::default(),
            KeyChord::palette_default(),
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::key(code)
    }

    fn ctrl(c: char) -> Event {
        Event::key_with(KeyCode::Char(c), Modifiers::CTRL)
    }

    fn type_str(app: &mut AppModel, s: &str, now: Instant) {
        for c in s.chars() {
            app.update(&key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn starts_on_home() {
        let app = app();
        let screen = app.view(80, 24);
        assert_eq!(screen.body[0].text, "Home  (/)");
        assert!(screen.overlay.is_empty());
        assert!(screen.status.text.contains("Ctrl+K"));
    }

    #[test]
    fn palette_routes_internal_page() {
        let mut app = app();
        let now = Instant::now();
        app.update(&ctrl('k'), now);
        assert!(app.palette().is_visible());
        type_str(&mut app, "about", now);
        assert_eq!(app.update(&key(KeyCode::Enter), now), None);
        assert_eq!(app.router().current(), "/about");
        assert_eq!(app.status(), "Opened /about");
        assert_eq!(app.view(80, 24).body[0].text, "About  (/about)");
    }

    #[test]
    fn palette_external_link_is_effect() {
        let mut app = app();
        let now = Instant::now();
        app.update(&ctrl('k'), now);
        type_str(&mut app, "github", now);
        let effect = app.update(&key(KeyCode::Enter), now);
        assert!(matches!(
            effect,
            Some(Effect::Launch(NavigationRequest::OpenExternal { ref url, .. }))
                if url == "https://github.com/Yash-Raj20"
        ));
        assert_eq!(app.router().current(), "/");
    }

    #[test]
    fn q_types_into_palette_but_quits_page() {
        let mut app = app();
        let now = Instant::now();
        app.update(&ctrl('k'), now);
        assert_eq!(app.update(&key(KeyCode::Char('q')), now), None);
        assert_eq!(app.palette().query(), "q");
        app.update(&key(KeyCode::Escape), now);
        assert_eq!(app.update(&key(KeyCode::Char('q')), now), Some(Effect::Quit));
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        let now = Instant::now();
        app.update(&ctrl('k'), now);
        assert_eq!(app.update(&ctrl('c'), now), Some(Effect::Quit));
    }

    #[test]
    fn backspace_goes_back() {
        let mut app = app();
        let now = Instant::now();
        app.update(&ctrl('k'), now);
        type_str(&mut app, "blog", now);
        app.update(&key(KeyCode::Enter), now);
        assert_eq!(app.router().current(), "/blog");
        app.update(&key(KeyCode::Backspace), now);
        assert_eq!(app.router().current(), "/");
    }

    #[test]
    fn assistant_chip_flow() {
        let mut app = app();
        let t0 = Instant::now();
        app.update(&ctrl('a'), t0);
        assert!(app.assistant().is_open());
        assert_eq!(app.selected_chip(), Some("What are your core skills?"));
        app.update(&key(KeyCode::Tab), t0);
        app.update(&key(KeyCode::BackTab), t0);
        app.update(&key(KeyCode::Enter), t0);

        let conversation = app.assistant().conversation().unwrap();
        // Greeting plus the chip text.
        assert_eq!(conversation.transcript().len(), 2);
        assert!(conversation.is_pending());
        assert!(
            app.view(80, 40)
                .body
                .iter()
                .any(|l| l.style == LineStyle::Typing)
        );

        assert_eq!(app.next_deadline(), Some(t0 + Duration::from_millis(1200)));
        assert_eq!(app.tick(t0 + Duration::from_millis(1200)), 1);
        let last = app.assistant().conversation().unwrap().transcript().last().unwrap();
        assert!(last.text().contains("proficient"));
    }

    #[test]
    fn typed_input_is_submitted_and_cleared() {
        let mut app = app();
        let t0 = Instant::now();
        app.update(&ctrl('a'), t0);
        type_str(&mut app, "hey q", t0);
        assert_eq!(app.input(), "hey q");
        app.update(&key(KeyCode::Enter), t0);
        assert_eq!(app.input(), "");
        let transcript = app.assistant().conversation().unwrap().transcript();
        assert_eq!(transcript.last().unwrap().text(), "hey q");
    }

    #[test]
    fn escape_closes_assistant_and_drops_reply() {
        let mut app = app();
        let t0 = Instant::now();
        app.update(&ctrl('a'), t0);
        app.update(&key(KeyCode::Enter), t0);
        app.update(&key(KeyCode::Escape), t0 + Duration::from_millis(100));
        assert!(!app.assistant().is_open());
        assert_eq!(app.status(), "Assistant closed");
        assert_eq!(app.next_deadline(), None);
        assert_eq!(app.tick(t0 + Duration::from_secs(2)), 0);
    }

    #[test]
    fn external_publisher_toggles_on_tick() {
        let mut app = app();
        let bus = app.bus();
        bus.publish(SessionSignal::Open);
        assert!(!app.assistant().is_open());
        app.tick(Instant::now());
        assert!(app.assistant().is_open());
        assert!(app.status().starts_with("Assistant open"));
    }

    #[test]
    fn palette_overlay_rows_styled() {
        let mut app = app();
        let now = Instant::now();
        app.update(&ctrl('k'), now);
        type_str(&mut app, "zzz", now);
        let screen = app.view(60, 20);
        assert_eq!(screen.overlay[0].style, LineStyle::PaletteQuery);
        assert_eq!(screen.overlay[1].style, LineStyle::PaletteEmpty);
        assert_eq!(app.update(&key(KeyCode::Enter), now), None);
        assert!(app.palette().is_visible());
    }

    #[test]
    fn small_terminal_keeps_input_line() {
        let mut app = app();
        app.update(&ctrl('a'), Instant::now());
        let screen = app.view(40, 6);
        assert_eq!(screen.body.len(), 5);
        assert_eq!(screen.body.last().unwrap().style, LineStyle::Input);
    }
}
