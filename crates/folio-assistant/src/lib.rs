#![forbid(unsafe_code)]

//! Canned-response assistant for the folio console.
//!
//! # Key Components
//!
//! - [`Responder`] - ordered keyword rules, first match wins, total
//! - [`Transcript`] - append-only log of [`ChatMessage`]s
//! - [`DeferredQueue`] - cancellable single-threaded timers driven by `Instant`s
//! - [`Conversation`] - submission handling, typing delay, serialized replies
//! - [`AssistantSession`] - open/close lifecycle plus the [`SignalBus`] used
//!   by other components to toggle it
//!
//! # Time
//!
//! Nothing here reads the monotonic clock. Every operation that depends on
//! time takes a `now: Instant`, so hosts drive the assistant from their event
//! loop and tests drive it with synthetic instants. Message timestamps are
//! derived from a wall-clock anchor fixed when a conversation is created.

pub mod conversation;
pub mod deferred;
pub mod responder;
pub mod session;
pub mod transcript;

pub use conversation::{Conversation, ConversationConfig};
pub use deferred::{DeferredQueue, Fired, TaskId};
pub use responder::{Predicate, Responder, ResponderError, ResponseRule, RuleSpec, RuleTable};
pub use session::{AssistantSession, SessionSignal, SignalBus, Subscription};
pub use transcript::{ChatMessage, MessageId, Role, Transcript};
