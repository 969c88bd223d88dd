mod health;
mod upload;

pub use health::health_handler;
pub use upload::{CONTENT_TRUNCATED_HEADER, ErrorResponse, QuizResponse, upload_handler};
