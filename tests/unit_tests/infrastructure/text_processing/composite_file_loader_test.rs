use std::sync::Arc;

use cardsmith::application::ports::{FileLoader, FileLoaderError};
use cardsmith::domain::{ContentType, Document};
use cardsmith::infrastructure::text_processing::{CompositeFileLoader, PlainTextAdapter};

use crate::pptx_builder::{build_pptx, text_shape};

#[tokio::test]
async fn given_default_loader_when_loading_slide_deck_then_delegates_to_pptx_adapter() {
    let loader = CompositeFileLoader::with_default_adapters();
    let deck = build_pptx(&[vec![text_shape(&["Hello slides"])]]);
    let document = Document::new(
        "deck.pptx".to_string(),
        ContentType::SlideDeck,
        deck.len() as u64,
    );

    let result = loader.extract_text(&deck, &document).await;

    assert_eq!(result.unwrap(), "Hello slides\n");
}

#[tokio::test]
async fn given_default_loader_when_loading_pdf_then_delegates_to_pdf_adapter() {
    let loader = CompositeFileLoader::with_default_adapters();
    let pdf_bytes = include_bytes!("../../../fixtures/sample.pdf");
    let document = Document::new(
        "sample.pdf".to_string(),
        ContentType::Pdf,
        pdf_bytes.len() as u64,
    );

    let result = loader.extract_text(pdf_bytes, &document).await;

    assert!(result.unwrap().contains("Paris"));
}

#[tokio::test]
async fn given_text_document_when_loading_then_delegates_to_text_adapter() {
    let loader = CompositeFileLoader::with_default_adapters();
    let text_bytes = b"Hello plain text";
    let document = Document::new(
        "readme.txt".to_string(),
        ContentType::PlainText,
        text_bytes.len() as u64,
    );

    let result = loader.extract_text(text_bytes, &document).await;

    assert_eq!(result.unwrap(), "Hello plain text");
}

#[tokio::test]
async fn given_unregistered_content_type_when_loading_then_returns_unsupported() {
    let text_adapter: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
    let loader = CompositeFileLoader::new(vec![(ContentType::PlainText, text_adapter)]);

    let data = b"fake deck";
    let document = Document::new(
        "lecture.pptx".to_string(),
        ContentType::SlideDeck,
        data.len() as u64,
    );

    let result = loader.extract_text(data, &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}
