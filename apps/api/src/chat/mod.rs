// Conversation sessions: transcript state, per-session exclusion, HTTP handlers.

pub mod handlers;
pub mod registry;
pub mod session;
