mod download;
mod error;
mod health;
mod minutes;
mod session_guard;
mod sessions;

pub use download::download_minutes_handler;
pub use error::ErrorResponse;
pub use health::health_handler;
pub use minutes::{
    MinutesResponse, clear_minutes_handler, current_minutes_handler, generate_minutes_handler,
};
pub use session_guard::SESSION_ID_HEADER;
pub use sessions::{LoginRequest, LoginResponse, login_handler, logout_handler};
