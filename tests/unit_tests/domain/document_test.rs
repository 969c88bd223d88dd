use cardsmith::domain::{ContentType, Document};

#[test]
fn given_supported_extensions_when_parsing_filename_then_maps_content_type() {
    assert_eq!(ContentType::from_filename("lecture.pdf"), Some(ContentType::Pdf));
    assert_eq!(
        ContentType::from_filename("slides.pptx"),
        Some(ContentType::SlideDeck)
    );
    assert_eq!(
        ContentType::from_filename("notes.txt"),
        Some(ContentType::PlainText)
    );
}

#[test]
fn given_mixed_case_extension_when_parsing_filename_then_matches_case_insensitively() {
    assert_eq!(ContentType::from_filename("REPORT.PDF"), Some(ContentType::Pdf));
    assert_eq!(
        ContentType::from_filename("Deck.PpTx"),
        Some(ContentType::SlideDeck)
    );
}

#[test]
fn given_multiple_dots_when_parsing_filename_then_uses_last_suffix() {
    assert_eq!(
        ContentType::from_filename("chapter.1.notes.txt"),
        Some(ContentType::PlainText)
    );
    assert_eq!(ContentType::from_filename("notes.txt.docx"), None);
}

#[test]
fn given_unsupported_or_missing_extension_when_parsing_filename_then_returns_none() {
    assert_eq!(ContentType::from_filename("report.docx"), None);
    assert_eq!(ContentType::from_filename("slides.ppt"), None);
    assert_eq!(ContentType::from_filename("pdf"), None);
    assert_eq!(ContentType::from_filename("notes."), None);
}

#[test]
fn given_new_documents_when_created_then_ids_differ() {
    let first = Document::new("a.txt".to_string(), ContentType::PlainText, 3);
    let second = Document::new("a.txt".to_string(), ContentType::PlainText, 3);

    assert_ne!(first.id, second.id);
    assert_eq!(first.size_bytes, 3);
}
