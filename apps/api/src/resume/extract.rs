//! Résumé text extraction for uploaded PDF and DOCX files.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported content type '{0}'")]
    UnsupportedType(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Extracts plain text from `bytes` according to the declared `content_type`.
///
/// Parameters such as `; charset=binary` are ignored. Anything other than PDF
/// or DOCX is rejected without looking at the bytes.
pub fn extract_text(content_type: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        PDF_CONTENT_TYPE => extract_pdf(bytes),
        DOCX_CONTENT_TYPE => extract_docx(bytes),
        _ => Err(ExtractError::UnsupportedType(content_type.to_string())),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed documents instead of returning an error.
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractError::Pdf("parser panicked on malformed document".to_string()))?;
    extracted
        .map(|text| text.trim().to_string())
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Reads `word/document.xml` out of the archive and joins its `<w:t>` runs,
/// one line per paragraph.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(format!("not a ZIP archive: {e}")))?;

    let mut doc_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Docx("missing word/document.xml".to_string()))?
        .read_to_string(&mut doc_xml)
        .map_err(|e| ExtractError::Docx(format!("failed to read document.xml: {e}")))?;

    let mut reader = Reader::from_str(&doc_xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"p" => current.clear(),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| ExtractError::Docx(format!("bad text run: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(format!("XML parse error: {e}"))),
            _ => {}
        }
    }

    Ok(paragraphs.join("\n").trim().to_string())
}
