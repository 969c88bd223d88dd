use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::FlashcardService;
use crate::presentation::config::Settings;

pub struct AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    pub flashcard_service: Arc<FlashcardService<F, L>>,
    pub settings: Settings,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            flashcard_service: Arc::clone(&self.flashcard_service),
            settings: self.settings.clone(),
        }
    }
}
