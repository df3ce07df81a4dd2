//! Conversation with the remote assistant.
//!
//! [`ChatSession`] is the synchronous state machine the UI drives;
//! [`AssistantClient`] performs the network round trip. They meet only
//! through [`ChatRequest`] handles and the `resolve` call, so the session
//! can be tested without a network.

mod client;
mod session;

pub use client::{parse_reply, AssistantClient};
pub use session::{
    ChatRequest, ChatRequestState, ChatSession, PendingRequest, DEFAULT_FALLBACK_MESSAGE,
};
