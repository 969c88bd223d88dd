use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

const SHAPE_TREE: &[u8] = b"spTree";
const TEXT_BODY: &[u8] = b"txBody";

/// Soft line break inside a paragraph (`a:br`).
const LINE_BREAK: char = '\u{b}';

/// Reads the text of every top-level shape, slide by slide, in presentation order.
/// Each shape's text is followed by a newline.
#[derive(Default)]
pub struct PptxAdapter;

impl PptxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_slides(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to open PPTX container: {e}"))
        })?;

        let presentation = read_part(&mut archive, PRESENTATION_PART)?;
        let relationships = read_part(&mut archive, PRESENTATION_RELS_PART)?;

        let slide_ids = slide_relationship_ids(&presentation)?;
        let targets = relationship_targets(&relationships)?;

        let mut text = String::new();
        for rel_id in &slide_ids {
            let target = targets.get(rel_id).ok_or_else(|| {
                FileLoaderError::ExtractionFailed(format!("slide relationship {rel_id} not found"))
            })?;
            let part_name = resolve_part_name(target);
            let slide = read_part(&mut archive, &part_name)?;
            collect_shape_text(&slide, &part_name, &mut text)?;
        }

        tracing::debug!(slide_count = slide_ids.len(), chars = text.len(), "PPTX slides read");
        Ok(text)
    }
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, FileLoaderError> {
    let mut file = archive.by_name(name).map_err(|e| {
        FileLoaderError::ExtractionFailed(format!("missing PPTX part {name}: {e}"))
    })?;
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(|e| {
        FileLoaderError::ExtractionFailed(format!("failed to read PPTX part {name}: {e}"))
    })?;
    Ok(content)
}

fn xml_error(part: &str, e: impl std::fmt::Display) -> FileLoaderError {
    FileLoaderError::ExtractionFailed(format!("malformed XML in {part}: {e}"))
}

/// Relationship ids of `p:sldIdLst`, in presentation order.
fn slide_relationship_ids(xml: &str) -> Result<Vec<String>, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldId" => {
                if let Some(id) = prefixed_id(&e)? {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(PRESENTATION_PART, e)),
            _ => {}
        }
    }

    Ok(ids)
}

// `r:id`; the bare `id` attribute is the numeric slide id.
fn prefixed_id(element: &BytesStart<'_>) -> Result<Option<String>, FileLoaderError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| xml_error(PRESENTATION_PART, e))?;
        if attr.key.local_name().as_ref() == b"id" && attr.key.prefix().is_some() {
            let value = attr
                .unescape_value()
                .map_err(|e| xml_error(PRESENTATION_PART, e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn relationship_targets(xml: &str) -> Result<HashMap<String, String>, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attribute_value(&e, "Id")?;
                let target = attribute_value(&e, "Target")?;
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(PRESENTATION_RELS_PART, e)),
            _ => {}
        }
    }

    Ok(targets)
}

fn attribute_value(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, FileLoaderError> {
    let Some(attr) = element
        .try_get_attribute(name)
        .map_err(|e| xml_error(PRESENTATION_RELS_PART, e))?
    else {
        return Ok(None);
    };
    let value = attr
        .unescape_value()
        .map_err(|e| xml_error(PRESENTATION_RELS_PART, e))?;
    Ok(Some(value.into_owned()))
}

/// Targets are relative to `ppt/` unless absolute within the package.
fn resolve_part_name(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{target}"),
    }
}

fn collect_shape_text(xml: &str, part: &str, out: &mut String) -> Result<(), FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut collector = ShapeTextCollector::new(out);

    loop {
        match reader.read_event().map_err(|e| xml_error(part, e))? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                collector.open(&name, path.last().map(Vec::as_slice));
                path.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name().as_ref().to_vec();
                let parent = path.last().map(Vec::as_slice);
                collector.open(&name, parent);
                collector.close(&name, parent);
            }
            Event::End(_) => {
                let name = path.pop().unwrap_or_default();
                collector.close(&name, path.last().map(Vec::as_slice));
            }
            Event::Text(t) if collector.in_text => {
                let text = t.unescape().map_err(|e| xml_error(part, e))?;
                collector.push_text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(())
}

/// Tracks the top-level `p:sp` being read and its paragraphs. Shapes nested
/// in groups and text in tables are not part of the slide's shape text.
struct ShapeTextCollector<'a> {
    out: &'a mut String,
    paragraphs: Option<Vec<String>>,
    paragraph: Option<String>,
    in_text: bool,
}

impl<'a> ShapeTextCollector<'a> {
    fn new(out: &'a mut String) -> Self {
        Self {
            out,
            paragraphs: None,
            paragraph: None,
            in_text: false,
        }
    }

    fn open(&mut self, name: &[u8], parent: Option<&[u8]>) {
        match name {
            b"sp" if parent == Some(SHAPE_TREE) => self.paragraphs = Some(Vec::new()),
            b"p" if parent == Some(TEXT_BODY) && self.paragraphs.is_some() => {
                self.paragraph = Some(String::new())
            }
            b"t" if self.paragraph.is_some() => self.in_text = true,
            b"br" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.push(LINE_BREAK);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8], parent: Option<&[u8]>) {
        match name {
            b"t" => self.in_text = false,
            b"p" if parent == Some(TEXT_BODY) => {
                if let (Some(paragraphs), Some(paragraph)) =
                    (self.paragraphs.as_mut(), self.paragraph.take())
                {
                    paragraphs.push(paragraph);
                }
            }
            b"sp" if parent == Some(SHAPE_TREE) => {
                if let Some(paragraphs) = self.paragraphs.take() {
                    self.out.push_str(&paragraphs.join("\n"));
                    self.out.push('\n');
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_str(text);
        }
    }
}

#[async_trait]
impl FileLoader for PptxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::SlideDeck {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let data_owned = data.to_vec();

        let text = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_slides(&data_owned)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PPTX extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(chars = text.len(), "PPTX text extraction complete");
        Ok(text)
    }
}
