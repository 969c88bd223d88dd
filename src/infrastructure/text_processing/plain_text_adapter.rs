use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Decodes `.txt` uploads as strict UTF-8. The text is returned untouched.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::PlainText {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let text = String::from_utf8(data.to_vec()).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!(
                "{} is not UTF-8 text: invalid byte at offset {}",
                document.filename,
                e.utf8_error().valid_up_to()
            ))
        })?;

        tracing::debug!(chars = text.chars().count(), "Text file decoded");
        Ok(text)
    }
}
