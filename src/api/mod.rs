pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatClient, ChatSender, DEFAULT_API_URL};
pub use error::ApiError;
pub use types::{ChatRequest, ChatResponse, Source};
