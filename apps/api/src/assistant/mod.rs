// Portfolio assistant: classifies visitor questions and answers them from the
// owner's knowledge snapshot, optionally asking the backend's AI endpoint first.

pub mod formatter;
pub mod handlers;
pub mod intent;
pub mod prompts;
pub mod responder;
pub mod session;
pub mod speech;

pub use responder::{RemoteDelegate, Responder};
