#![forbid(unsafe_code)]

//! Assistant panel lifecycle and the signal bus used to drive it.
//!
//! The panel can be toggled from anywhere that holds a [`SignalBus`]
//! handle. An [`AssistantSession`] subscribes at construction and applies
//! queued signals when the host calls
//! [`process_signals`](AssistantSession::process_signals) from its loop.
//!
//! Closing the panel tears down the mounted [`Conversation`]: pending
//! replies are cancelled and the transcript is discarded. Opening mounts a
//! fresh conversation.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use crate::conversation::{Conversation, ConversationConfig};
use crate::responder::Responder;
use crate::transcript::MessageId;

/// Requests understood by an [`AssistantSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Toggle,
    Open,
    Close,
}

/// Fan-out publish/subscribe channel.
///
/// Cloning yields another handle to the same subscriber list. Subscribers
/// whose [`Subscription`] was dropped are pruned on the next publish.
#[derive(Debug)]
pub struct SignalBus<T> {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<T>>>>,
}

impl<T> Clone for SignalBus<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> Default for SignalBus<T> {
    fn default() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> SignalBus<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new receiver.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        Subscription { rx }
    }

    /// Deliver `signal` to every live subscriber. Returns how many received it.
    pub fn publish(&self, signal: T) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(signal.clone()).is_ok());
        subscribers.len()
    }

    /// Live subscriber count as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Receiving end of a [`SignalBus`].
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> Subscription<T> {
    /// Take every signal published since the last drain.
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    /// Take one signal, if any is queued.
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

/// The assistant panel: open/closed state plus the mounted conversation.
#[derive(Debug)]
pub struct AssistantSession {
    responder: Arc<Responder>,
    config: ConversationConfig,
    conversation: Option<Conversation>,
    signals: Subscription<SessionSignal>,
}

impl AssistantSession {
    /// Create a closed session listening on `bus`.
    pub fn new(responder: Arc<Responder>, config: ConversationConfig, bus: &SignalBus<SessionSignal>) -> Self {
        Self {
            responder,
            config,
            conversation: None,
            signals: bus.subscribe(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.conversation.is_some()
    }

    /// Mount a fresh conversation. No-op if already open.
    pub fn open(&mut self, now: Instant) -> bool {
        if self.conversation.is_some() {
            return false;
        }
        self.conversation = Some(Conversation::new(
            Arc::clone(&self.responder),
            self.config.clone(),
            now,
        ));
        tracing::info!("assistant opened");
        true
    }

    /// Tear down the conversation. No-op if already closed.
    pub fn close(&mut self) -> bool {
        let Some(mut conversation) = self.conversation.take() else {
            return false;
        };
        let cancelled = conversation.teardown();
        tracing::info!(
            cancelled,
            messages = conversation.transcript().len(),
            "assistant closed"
        );
        true
    }

    /// Flip open/closed. Returns the new state.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_open() {
            self.close();
        } else {
            self.open(now);
        }
        self.is_open()
    }

    /// Apply queued bus signals in publish order. Returns how many were applied.
    pub fn process_signals(&mut self, now: Instant) -> usize {
        let signals = self.signals.drain();
        for signal in &signals {
            tracing::debug!(?signal, "assistant signal");
            match signal {
                SessionSignal::Toggle => {
                    self.toggle(now);
                }
                SessionSignal::Open => {
                    self.open(now);
                }
                SessionSignal::Close => {
                    self.close();
                }
            }
        }
        signals.len()
    }

    #[must_use]
    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    /// Submit to the mounted conversation. `None` when closed.
    pub fn submit(&mut self, text: &str, now: Instant) -> Option<MessageId> {
        self.conversation.as_mut()?.submit(text, now)
    }

    /// Advance the mounted conversation. `0` when closed.
    pub fn poll(&mut self, now: Instant) -> usize {
        self.conversation.as_mut().map_or(0, |c| c.poll(now))
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.conversation.as_ref().and_then(Conversation::next_deadline)
    }
}
