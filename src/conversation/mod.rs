mod message;
mod state;

pub use message::{Message, Role};
pub use state::{Conversation, DEFAULT_FALLBACK_MESSAGE, Ignored, Phase, Submission};
