// Résumé upload: declared-type dispatch to the PDF or DOCX extractor.

pub mod extract;
pub mod handlers;
