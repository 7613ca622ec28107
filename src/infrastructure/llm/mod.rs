mod gemini_client;
mod gemini_types;
mod mock_media_client;

pub use gemini_client::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiClient};
pub use mock_media_client::{MockCalls, MockMediaModelClient};
