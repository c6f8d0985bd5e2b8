#![forbid(unsafe_code)]

//! Conversation controller.
//!
//! Sits between raw submissions and the [`Responder`]: user messages are
//! appended immediately, replies land after a fixed typing delay. Replies
//! are serialized: each submission is scheduled one typing delay after the
//! later of its own arrival and the previous reply's deadline. Deadlines
//! therefore never decrease, so replies arrive in submission order and none
//! lands sooner than the typing delay after its question.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::deferred::DeferredQueue;
use crate::responder::Responder;
use crate::transcript::{MessageId, Role, Transcript};

/// Default delay before a reply is appended.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1200);

/// Conversation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationConfig {
    /// Minimum time between a submission and its reply. Queued replies also
    /// wait for the one ahead of them.
    pub reply_delay: Duration,
    /// Assistant message appended when the conversation starts.
    pub greeting: Option<String>,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            greeting: None,
        }
    }
}

impl ConversationConfig {
    #[must_use]
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }
}

/// One mounted chat session.
#[derive(Debug)]
pub struct Conversation {
    responder: Arc<Responder>,
    config: ConversationConfig,
    transcript: Transcript,
    /// One task per unanswered submission, deadlines non-decreasing.
    replies: DeferredQueue<String>,
    anchor: (Instant, DateTime<Utc>),
    active: bool,
}

impl Conversation {
    /// Start a conversation, anchoring timestamps to the current wall clock.
    #[must_use]
    pub fn new(responder: Arc<Responder>, config: ConversationConfig, now: Instant) -> Self {
        Self::with_anchor(responder, config, now, Utc::now())
    }

    /// Start a conversation where `now` corresponds to wall time `wall`.
    #[must_use]
    pub fn with_anchor(
        responder: Arc<Responder>,
        config: ConversationConfig,
        now: Instant,
        wall: DateTime<Utc>,
    ) -> Self {
        let mut conversation = Self {
            responder,
            config,
            transcript: Transcript::new(),
            replies: DeferredQueue::new(),
            anchor: (now, wall),
            active: true,
        };
        if let Some(greeting) = conversation.config.greeting.clone() {
            let at = conversation.wall_time(now);
            conversation.transcript.push(Role::Assistant, greeting, at);
        }
        conversation
    }

    /// Submit user text.
    ///
    /// Whitespace-only input and submissions after [`teardown`](Self::teardown)
    /// are ignored and return `None`.
    pub fn submit(&mut self, text: &str, now: Instant) -> Option<MessageId> {
        if !self.active {
            return None;
        }
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let at = self.wall_time(now);
        let id = self.transcript.push(Role::User, text, at)?;
        let from = self.replies.last_deadline().map_or(now, |last| last.max(now));
        let deadline = from.checked_add(self.config.reply_delay).unwrap_or(from);
        self.replies.schedule_at(text.to_string(), deadline);
        tracing::debug!(id = %id, pending = self.pending_count(), "user message appended");
        Some(id)
    }

    /// Append every reply due at `now`. Returns how many were appended.
    pub fn poll(&mut self, now: Instant) -> usize {
        if !self.active {
            return 0;
        }
        let mut appended = 0;
        while let Some(fired) = self.replies.pop_due(now) {
            let reply = self.responder.respond(&fired.payload).to_string();
            let at = self.wall_time(fired.deadline);
            if let Some(id) = self.transcript.push(Role::Assistant, reply, at) {
                tracing::debug!(id = %id, "assistant reply appended");
                appended += 1;
            }
        }
        appended
    }

    /// Cancel every pending reply and deactivate. Returns how many were dropped.
    pub fn teardown(&mut self) -> usize {
        let dropped = self.replies.cancel_all();
        if self.active {
            tracing::debug!(dropped, "conversation torn down");
        }
        self.active = false;
        dropped
    }

    /// Whether a reply is on its way (drives the typing indicator).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.replies.is_empty()
    }

    /// Submissions still waiting for a reply.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.replies.len()
    }

    /// When the next reply lands, if one is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.replies.next_deadline()
    }

    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.replies.time_until_next(now)
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn config(&self) -> &ConversationConfig {
        &self.config
    }

    #[must_use]
    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    fn wall_time(&self, at: Instant) -> DateTime<Utc> {
        let (base, wall) = self.anchor;
        let offset = if at >= base {
            chrono::Duration::from_std(at - base).ok()
        } else {
            chrono::Duration::from_std(base - at).ok().map(|d| -d)
        };
        offset
            .and_then(|d| wall.checked_add_signed(d))
            .unwrap_or(wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_content::Content;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn responder() -> Arc<Responder> {
        Arc::new(Responder::for_profile(Content::builtin().profile()))
    }

    fn start(config: ConversationConfig) -> (Conversation, Instant) {
        let t0 = Instant::now();
        let wall = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        (Conversation::with_anchor(responder(), config, t0, wall), t0)
    }

    #[test]
    fn reply_lands_after_delay() {
        let (mut c, t0) = start(ConversationConfig::default());
        let id = c.submit("What are your core skills?", t0).unwrap();
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript().messages()[0].id(), id);
        assert!(c.is_pending());
        assert_eq!(c.poll(t0 + ms(1199)), 0);
        assert_eq!(c.poll(t0 + ms(1200)), 1);
        assert!(!c.is_pending());
        let reply = c.transcript().last().unwrap();
        assert_eq!(reply.role(), Role::Assistant);
        assert!(reply.text().contains("React.js"));
        assert_eq!(reply.created_at().to_rfc3339(), "2025-01-01T00:00:01.200+00:00");
    }

    #[test]
    fn whitespace_submission_is_noop() {
        let (mut c, t0) = start(ConversationConfig::default());
        assert!(c.submit("   \t", t0).is_none());
        assert!(c.transcript().is_empty());
        assert!(!c.is_pending());
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn text_is_trimmed() {
        let (mut c, t0) = start(ConversationConfig::default());
        c.submit("  hello  ", t0);
        assert_eq!(c.transcript().messages()[0].text(), "hello");
    }

    #[test]
    fn greeting_comes_first() {
        let (c, _) = start(ConversationConfig::default().with_greeting("Hi there!"));
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript().messages()[0].role(), Role::Assistant);
    }

    #[test]
    fn back_to_back_submissions_are_serialized() {
        let (mut c, t0) = start(ConversationConfig::default());
        c.submit("skills?", t0);
        c.submit("contact?", t0 + ms(100));
        assert_eq!(c.pending_count(), 2);
        assert_eq!(c.next_deadline(), Some(t0 + ms(1200)));
        // The second is scheduled behind the first.
        assert_eq!(c.poll(t0 + ms(1300)), 1);
        assert_eq!(c.next_deadline(), Some(t0 + ms(2400)));
        assert_eq!(c.poll(t0 + ms(2400)), 1);

        let roles: Vec<_> = c.transcript().iter().map(|m| m.role()).collect();
        assert_eq!(roles, [Role::User, Role::User, Role::Assistant, Role::Assistant]);
        let msgs = c.transcript().messages();
        assert!(msgs[2].text().contains("proficient"));
        assert!(msgs[3].text().contains("hello@ratnesh.dev"));
    }

    #[test]
    fn late_poll_flushes_whole_queue_in_order() {
        let (mut c, t0) = start(ConversationConfig::default());
        c.submit("skills", t0);
        c.submit("email", t0);
        c.submit("hello", t0);
        assert_eq!(c.poll(t0 + ms(10_000)), 3);
        let msgs = c.transcript().messages();
        assert!(msgs[3].text().contains("proficient"));
        assert!(msgs[4].text().contains("Contact page"));
        assert!(msgs[5].text().starts_with("Hello!"));
        assert!(msgs[3].created_at() < msgs[4].created_at());
    }

    #[test]
    fn queued_reply_waits_full_delay_after_its_question() {
        let (mut c, t0) = start(ConversationConfig::default());
        c.submit("skills", t0);
        c.submit("email", t0 + ms(5000));
        // Only the first is due; the second counts from its own submission.
        assert_eq!(c.poll(t0 + ms(5001)), 1);
        assert_eq!(c.next_deadline(), Some(t0 + ms(6200)));
        assert_eq!(c.poll(t0 + ms(6199)), 0);
        assert_eq!(c.poll(t0 + ms(6200)), 1);

        let msgs = c.transcript().messages();
        let roles: Vec<_> = msgs.iter().map(|m| m.role()).collect();
        assert_eq!(roles, [Role::User, Role::User, Role::Assistant, Role::Assistant]);
        assert!(msgs[2].created_at() >= msgs[0].created_at());
        assert!(msgs[3].created_at() >= msgs[1].created_at());
        assert_eq!(msgs[3].created_at().to_rfc3339(), "2025-01-01T00:00:06.200+00:00");
        assert!(msgs[3].text().contains("hello@ratnesh.dev"));
    }

    #[test]
    fn teardown_cancels_pending_replies() {
        let (mut c, t0) = start(ConversationConfig::default());
        c.submit("skills", t0);
        c.submit("projects", t0);
        assert_eq!(c.teardown(), 2);
        assert!(!c.is_active());
        assert_eq!(c.poll(t0 + ms(5000)), 0);
        assert_eq!(c.transcript().len(), 2);
        assert!(c.submit("more", t0 + ms(6000)).is_none());
        assert_eq!(c.teardown(), 0);
    }

    #[test]
    fn wall_time_before_anchor() {
        let t0 = Instant::now() + ms(1000);
        let wall = DateTime::parse_from_rfc3339("2025-01-01T00:00:01Z")
            .unwrap()
            .with_timezone(&Utc);
        let c = Conversation::with_anchor(responder(), ConversationConfig::default(), t0, wall);
        assert_eq!(
            c.wall_time(t0 - ms(1000)).to_rfc3339(),
            "2025-01-01T00:00:00+00:00"
        );
    }
}
