mod flashcard_filter;
mod flashcard_service;
mod prompt_builder;
mod response_recoverer;

pub use flashcard_filter::filter_flashcards;
pub use flashcard_service::{FlashcardDeck, FlashcardError, FlashcardService, PipelineStage};
pub use prompt_builder::{Prompt, PromptBuilder};
pub use response_recoverer::{JsonCandidate, RecoveryError, locate_json_array, recover_flashcards};
