//! Sample document writers.
//!
//! Mirrors an optional-dependency fallback: builds with the `rich-docs`
//! feature produce a real OOXML word processing document, builds without it
//! substitute a plain text file under a different name.

use super::SampleError;

#[cfg(feature = "rich-docs")]
const SAMPLE_DOC_NAME: &str = "sample2.docx";
#[cfg(feature = "rich-docs")]
const SAMPLE_DOC_HEADING: &str = "Blob Storage Demo";
#[cfg(feature = "rich-docs")]
const SAMPLE_DOC_BODY: &str = "This is a sample document for blob upload testing.";

const SAMPLE_DOC_FALLBACK_NAME: &str = "sample2.txt";
const SAMPLE_DOC_FALLBACK_CONTENT: &str =
    "Sample document content (as plain text since rich document support is disabled)";

/// How the second sample file is produced.
///
/// The variant is decided once per process by [`SampleWriter::detect`] and
/// drives both the file name and the bytes, so creation and verification
/// always agree on what the document is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWriter {
    /// Minimal OOXML package with a title and one paragraph.
    #[cfg(feature = "rich-docs")]
    Document,
    /// Plain text stand-in.
    PlainText,
}

impl SampleWriter {
    /// Pick the richest writer this build supports.
    pub fn detect() -> Self {
        #[cfg(feature = "rich-docs")]
        return SampleWriter::Document;

        #[cfg(not(feature = "rich-docs"))]
        SampleWriter::PlainText
    }

    /// Writer name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            #[cfg(feature = "rich-docs")]
            SampleWriter::Document => "document",
            SampleWriter::PlainText => "plain_text",
        }
    }

    /// File name of the document sample produced by this writer.
    pub fn document_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "rich-docs")]
            SampleWriter::Document => SAMPLE_DOC_NAME,
            SampleWriter::PlainText => SAMPLE_DOC_FALLBACK_NAME,
        }
    }

    /// Bytes of the document sample produced by this writer.
    pub fn document_bytes(&self) -> Result<Vec<u8>, SampleError> {
        match self {
            #[cfg(feature = "rich-docs")]
            SampleWriter::Document => docx::build_document(SAMPLE_DOC_HEADING, SAMPLE_DOC_BODY),
            SampleWriter::PlainText => Ok(SAMPLE_DOC_FALLBACK_CONTENT.as_bytes().to_vec()),
        }
    }
}

#[cfg(feature = "rich-docs")]
mod docx {
    //! Minimal OOXML assembly: the three mandatory package parts, zipped.

    use std::io::{Cursor, Write};

    use zip::write::FileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use crate::samples::SampleError;

    const CONTENT_TYPES: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"</Types>"#,
    );

    const RELS: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"</Relationships>"#,
    );

    pub fn build_document(heading: &str, body: &str) -> Result<Vec<u8>, SampleError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (part, content) in [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", RELS.to_string()),
            ("word/document.xml", document_xml(heading, body)),
        ] {
            zip.start_file(part, options())
                .map_err(|e| SampleError::Document(e.to_string()))?;
            zip.write_all(content.as_bytes())
                .map_err(|e| SampleError::Document(e.to_string()))?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| SampleError::Document(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    fn options() -> FileOptions {
        FileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    fn document_xml(heading: &str, body: &str) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
                r#"<w:body>"#,
                r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>{heading}</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:t>{body}</w:t></w:r></w:p>"#,
                r#"</w:body>"#,
                r#"</w:document>"#,
            ),
            heading = escape_xml(heading),
            body = escape_xml(body),
        )
    }

    fn escape_xml(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(SampleWriter::detect(), SampleWriter::detect());
    }

    #[cfg(feature = "rich-docs")]
    #[test]
    fn test_document_writer_produces_docx() {
        let writer = SampleWriter::detect();
        assert_eq!(writer, SampleWriter::Document);
        assert_eq!(writer.document_name(), "sample2.docx");

        let bytes = writer.document_bytes().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[cfg(not(feature = "rich-docs"))]
    #[test]
    fn test_plain_text_fallback() {
        let writer = SampleWriter::detect();
        assert_eq!(writer, SampleWriter::PlainText);
        assert_eq!(writer.document_name(), "sample2.txt");

        let bytes = writer.document_bytes().unwrap();
        assert!(bytes.starts_with(b"Sample document content"));
    }
}
