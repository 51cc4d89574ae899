//! Plain text of a Word (.docx) document: the `w:t` runs of `word/document.xml`,
//! one line per paragraph.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::DocumentError;

const BODY_PART: &str = "word/document.xml";

pub fn extract_docx_text(content: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| DocumentError::Docx(format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(BODY_PART)
        .map_err(|e| DocumentError::Docx(format!("{BODY_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(format!("{BODY_PART}: {e}")))?;

    document_text(&xml)
}

fn document_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run_text => {
                let run = t
                    .unescape()
                    .map_err(|e| DocumentError::Docx(format!("bad text run: {e}")))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DocumentError::Docx(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    Ok(text.trim_end().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// A minimal .docx archive holding the given paragraphs.
    pub(crate) fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(BODY_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let bytes = docx_bytes(&["Jane Doe", "Python &amp; AWS"]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Jane Doe\nPython & AWS");
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let xml = "<w:document><w:body><w:p>\
                   <w:r><w:t>Skills:</w:t></w:r><w:r><w:tab/><w:t>SQL</w:t></w:r>\
                   <w:r><w:br/><w:t>Docker</w:t></w:r></w:p></w:body></w:document>";
        assert_eq!(document_text(xml).unwrap(), "Skills:\tSQL\nDocker");
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        assert!(matches!(
            extract_docx_text(b"plain text, not a docx"),
            Err(DocumentError::Docx(_))
        ));
    }

    #[test]
    fn test_archive_without_body_is_an_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            extract_docx_text(&bytes),
            Err(DocumentError::Docx(_))
        ));
    }
}
