use std::fmt;
use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient, LlmClientError};
use crate::domain::{ContentType, Document, Flashcard};
use crate::infrastructure::observability::log_preview;

use super::flashcard_filter::filter_flashcards;
use super::prompt_builder::PromptBuilder;
use super::response_recoverer::{RecoveryError, recover_flashcards};

/// Runs one upload through extraction, prompting, the model call, JSON
/// recovery and filtering. Any failure ends the run.
pub struct FlashcardService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    file_loader: Arc<F>,
    llm_client: Arc<L>,
    prompt_builder: PromptBuilder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardDeck {
    pub cards: Vec<Flashcard>,
    /// The document was longer than the prompt budget and only its head was used.
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Extracting,
    GeneratingPrompt,
    CallingModel,
    RecoveringJson,
    Filtering,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracting => "extracting",
            Self::GeneratingPrompt => "generating_prompt",
            Self::CallingModel => "calling_model",
            Self::RecoveringJson => "recovering_json",
            Self::Filtering => "filtering",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlashcardError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("failed to extract text from {content_type:?} file: {source}")]
    Extraction {
        content_type: ContentType,
        #[source]
        source: FileLoaderError,
    },
    #[error("no extractable content")]
    EmptyContent,
    #[error("model backend unavailable: {0}")]
    ModelUnavailable(#[source] LlmClientError),
    #[error("model backend failed: {0}")]
    Model(#[source] LlmClientError),
    #[error("malformed model response: {0}")]
    MalformedResponse(#[from] RecoveryError),
    #[error("no valid flashcards in model response")]
    NoValidFlashcards,
}

impl FlashcardError {
    /// Stage the pipeline was in when the error occurred.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::UnsupportedFormat(_) => None,
            Self::Extraction { .. } | Self::EmptyContent => Some(PipelineStage::Extracting),
            Self::ModelUnavailable(_) | Self::Model(_) => Some(PipelineStage::CallingModel),
            Self::MalformedResponse(_) => Some(PipelineStage::RecoveringJson),
            Self::NoValidFlashcards => Some(PipelineStage::Filtering),
        }
    }
}

impl From<LlmClientError> for FlashcardError {
    fn from(err: LlmClientError) -> Self {
        if err.is_unavailable() {
            Self::ModelUnavailable(err)
        } else {
            Self::Model(err)
        }
    }
}

impl<F, L> FlashcardService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    pub fn new(file_loader: Arc<F>, llm_client: Arc<L>, prompt_builder: PromptBuilder) -> Self {
        Self {
            file_loader,
            llm_client,
            prompt_builder,
        }
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn generate(
        &self,
        filename: &str,
        data: &[u8],
    ) -> Result<FlashcardDeck, FlashcardError> {
        let content_type = ContentType::from_filename(filename)
            .ok_or_else(|| FlashcardError::UnsupportedFormat(filename.to_string()))?;
        let document = Document::new(filename.to_string(), content_type, data.len() as u64);

        tracing::debug!(
            stage = %PipelineStage::Extracting,
            content_type = ?content_type,
            size_bytes = document.size_bytes,
            "Extracting text"
        );
        let text = self.extract(data, &document).await?;
        if text.trim().is_empty() {
            tracing::warn!(document_id = %document.id.as_uuid(), "Extracted text is empty");
            return Err(FlashcardError::EmptyContent);
        }

        tracing::debug!(stage = %PipelineStage::GeneratingPrompt, chars = text.chars().count(), "Building prompt");
        let prompt = self.prompt_builder.build(&text);
        if prompt.truncated {
            tracing::warn!(
                limit = self.prompt_builder.max_input_chars(),
                sent_chars = prompt.input_chars,
                "Document exceeds prompt budget, only its head is sent to the model"
            );
        }

        tracing::debug!(stage = %PipelineStage::CallingModel, "Requesting completion");
        let completion = self.llm_client.complete(&prompt.text).await.map_err(|e| {
            tracing::error!(error = %e, "Model call failed");
            FlashcardError::from(e)
        })?;
        tracing::debug!(response = %log_preview(&completion), "Model responded");

        tracing::debug!(stage = %PipelineStage::RecoveringJson, "Recovering JSON");
        let items = recover_flashcards(&completion)?;

        tracing::debug!(stage = %PipelineStage::Filtering, decoded = items.len(), "Filtering flashcards");
        let decoded = items.len();
        let cards = filter_flashcards(items);
        if cards.len() < decoded {
            tracing::warn!(
                dropped = decoded - cards.len(),
                "Discarded malformed flashcard entries"
            );
        }
        if cards.is_empty() {
            return Err(FlashcardError::NoValidFlashcards);
        }

        tracing::info!(
            document_id = %document.id.as_uuid(),
            cards = cards.len(),
            truncated = prompt.truncated,
            "Flashcards generated"
        );

        Ok(FlashcardDeck {
            cards,
            truncated: prompt.truncated,
        })
    }

    async fn extract(&self, data: &[u8], document: &Document) -> Result<String, FlashcardError> {
        self.file_loader
            .extract_text(data, document)
            .await
            .map_err(|e| match e {
                FileLoaderError::UnsupportedContentType(_) => {
                    FlashcardError::UnsupportedFormat(document.filename.clone())
                }
                source => {
                    tracing::error!(error = %source, filename = %document.filename, "Text extraction failed");
                    FlashcardError::Extraction {
                        content_type: document.content_type,
                        source,
                    }
                }
            })
    }
}
