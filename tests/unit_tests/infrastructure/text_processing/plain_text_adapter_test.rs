use cardsmith::application::ports::{FileLoader, FileLoaderError};
use cardsmith::domain::{ContentType, Document};
use cardsmith::infrastructure::text_processing::PlainTextAdapter;

#[tokio::test]
async fn given_valid_utf8_bytes_when_extracting_then_returns_content_verbatim() {
    let adapter = PlainTextAdapter;
    let text_bytes = "  Paris is the capital of France.\r\n\tÉtat  \n".as_bytes();
    let document = Document::new(
        "notes.txt".to_string(),
        ContentType::PlainText,
        text_bytes.len() as u64,
    );

    let result = adapter.extract_text(text_bytes, &document).await;

    assert_eq!(
        result.unwrap(),
        "  Paris is the capital of France.\r\n\tÉtat  \n"
    );
}

#[tokio::test]
async fn given_invalid_utf8_bytes_when_extracting_then_returns_extraction_failed() {
    let adapter = PlainTextAdapter;
    let invalid_bytes: &[u8] = &[0xFF, 0xFE, 0xFD];
    let document = Document::new(
        "broken.txt".to_string(),
        ContentType::PlainText,
        invalid_bytes.len() as u64,
    );

    let result = adapter.extract_text(invalid_bytes, &document).await;

    match result {
        Err(FileLoaderError::ExtractionFailed(message)) => {
            assert_eq!(
                message,
                "broken.txt is not UTF-8 text: invalid byte at offset 0"
            );
        }
        other => panic!("expected ExtractionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_non_text_content_type_when_extracting_then_returns_unsupported() {
    let adapter = PlainTextAdapter;
    let data = b"some data";
    let document = Document::new("file.pdf".to_string(), ContentType::Pdf, data.len() as u64);

    let result = adapter.extract_text(data, &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}
