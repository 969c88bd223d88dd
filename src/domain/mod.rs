mod document;
mod document_id;
mod flashcard;

pub use document::{ContentType, Document};
pub use document_id::DocumentId;
pub use flashcard::Flashcard;
