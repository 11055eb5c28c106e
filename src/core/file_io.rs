/// File import and export.
///
/// Reading files, triggering downloads and writing PDF bytes are done by a
/// `FileIo` collaborator supplied by the host (browser glue, native CLI,
/// tests). This module decides what to read, how page text is joined, and
/// how an exported script is laid out on PDF pages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::format::{ExportFormat, ImportFormat};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Import error: {0}")]
    Read(String),
}

/// Host-provided file access.
pub trait FileIo {
    /// Read the named file as plain text.
    fn read_as_text(&self, file_name: &str) -> Result<String, ImportError>;

    /// Extract the text items of each page of a PDF, in page order.
    fn read_as_pdf_pages(&self, file_name: &str) -> Result<Vec<Vec<String>>, ImportError>;

    /// Hand `content` to the user as a download.
    fn download(&self, content: &str, file_name: &str, mime_type: &str);
}

/// Lower-cased text after the last `.`, or the whole name when there is none.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_lowercase()
}

/// Work out how a file should be imported from its name.
pub fn detect_import_format(file_name: &str) -> Result<ImportFormat, ImportError> {
    let ext = extension_of(file_name);
    ImportFormat::from_extension(&ext).ok_or(ImportError::UnsupportedFormat(ext))
}

/// Join extracted PDF text: items on a page are space-separated and every
/// page ends with a line break.
pub fn join_pdf_pages(pages: &[Vec<String>]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page.join(" "));
        text.push('\n');
    }
    text
}

/// Read a file into script text. Nothing is modified here; the caller
/// decides what to do with the result.
pub fn import_text(file_name: &str, io: &dyn FileIo) -> Result<String, ImportError> {
    let text = match detect_import_format(file_name)? {
        ImportFormat::PlainText => io.read_as_text(file_name)?,
        ImportFormat::Pdf => join_pdf_pages(&io.read_as_pdf_pages(file_name)?),
    };
    log::info!("imported {} ({} bytes)", file_name, text.len());
    Ok(text)
}

/// Page geometry for PDF export, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    pub title: String,
    pub font: String,
    pub font_size: f32,
    pub margin: f32,
    pub line_height: f32,
    pub text_width: f32,
    /// A new page starts once the next line would sit below this.
    pub page_bottom: f32,
    /// Advance width of one glyph as a fraction of the font size.
    pub glyph_advance: f32,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            title: "Screenplay Export".to_string(),
            font: "Courier".to_string(),
            font_size: 12.0,
            margin: 54.0,
            line_height: 16.0,
            text_width: 460.0,
            page_bottom: 800.0,
            glyph_advance: 0.6,
        }
    }
}

impl PdfSettings {
    /// How many monospaced glyphs fit across the text width.
    pub fn columns(&self) -> usize {
        let glyph = self.font_size * self.glyph_advance;
        if glyph <= 0.0 {
            return usize::MAX;
        }
        ((self.text_width / glyph).floor() as usize).max(1)
    }
}

/// A line of text placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// A laid-out document ready to be turned into PDF bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfLayout {
    pub font: String,
    pub font_size: f32,
    pub pages: Vec<Vec<PlacedLine>>,
}

/// Lay out `text` as A4 pages: a title, a blank gap, then wrapped lines.
pub fn layout_pdf(text: &str, settings: &PdfSettings) -> PdfLayout {
    let mut pages = vec![Vec::new()];
    let mut y = settings.margin;

    pages[0].push(PlacedLine {
        x: settings.margin,
        y,
        text: settings.title.clone(),
    });
    y += 2.0 * settings.line_height;

    let columns = settings.columns();
    for line in text.split('\n').flat_map(|l| wrap_line(l, columns)) {
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                x: settings.margin,
                y,
                text: line,
            });
        }
        y += settings.line_height;
        if y > settings.page_bottom {
            pages.push(Vec::new());
            y = settings.margin;
        }
    }

    if pages.len() > 1 && pages.last().is_some_and(Vec::is_empty) {
        pages.pop();
    }

    PdfLayout {
        font: settings.font.clone(),
        font_size: settings.font_size,
        pages,
    }
}

/// Wrap a single line at word boundaries to at most `columns` chars.
/// Leading indentation stays on the first line. Words longer than a line
/// are split hard.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let line = line.trim_end_matches('\r');
    if line.chars().count() <= columns {
        return vec![line.to_string()];
    }

    let body = line.trim_start_matches(' ');
    let indent = &line[..line.len() - body.len()];

    let mut out = Vec::new();
    let mut current = indent.to_string();
    let mut current_len = indent.len();
    let mut has_word = false;

    for word in body.split(' ') {
        let word_len = word.chars().count();
        let needed = if has_word {
            current_len + 1 + word_len
        } else {
            current_len + word_len
        };

        if needed <= columns {
            if has_word {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
            has_word = true;
            continue;
        }

        if current_len > 0 {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        has_word = false;

        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(columns).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                out.push(chunk.iter().collect());
            } else {
                current = chunk.iter().collect();
                current_len = chunk.len();
                has_word = true;
            }
        }
    }

    if current_len > 0 || out.is_empty() {
        out.push(current);
    }
    out
}

/// Hand a text export to the collaborator. PDF layouts are returned
/// untouched since turning them into bytes is up to the host.
pub fn deliver(artifact: ExportArtifact, io: &dyn FileIo) -> Option<ExportArtifact> {
    match artifact {
        ExportArtifact::Text {
            file_name,
            mime_type,
            content,
        } => {
            io.download(&content, &file_name, &mime_type);
            None
        }
        pdf @ ExportArtifact::Pdf { .. } => Some(pdf),
    }
}

/// What an export produces for the host to deliver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportArtifact {
    Text {
        file_name: String,
        mime_type: String,
        content: String,
    },
    Pdf {
        file_name: String,
        layout: PdfLayout,
    },
}

impl ExportArtifact {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Text { file_name, .. } | Self::Pdf { file_name, .. } => file_name,
        }
    }
}

/// Build the export artifact for `text` in the given format.
pub fn export(text: &str, format: ExportFormat, pdf: &PdfSettings) -> ExportArtifact {
    let artifact = match format {
        ExportFormat::Pdf => ExportArtifact::Pdf {
            file_name: format.file_name().to_string(),
            layout: layout_pdf(text, pdf),
        },
        ExportFormat::Text | ExportFormat::Fountain => ExportArtifact::Text {
            file_name: format.file_name().to_string(),
            mime_type: format.mime_type().to_string(),
            content: text.to_string(),
        },
    };
    log::info!("exported {}", artifact.file_name());
    artifact
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryIo {
        text: String,
        pages: Vec<Vec<String>>,
        downloads: RefCell<Vec<(String, String, String)>>,
    }

    impl FileIo for MemoryIo {
        fn read_as_text(&self, _file_name: &str) -> Result<String, ImportError> {
            Ok(self.text.clone())
        }

        fn read_as_pdf_pages(&self, _file_name: &str) -> Result<Vec<Vec<String>>, ImportError> {
            Ok(self.pages.clone())
        }

        fn download(&self, content: &str, file_name: &str, mime_type: &str) {
            self.downloads.borrow_mut().push((
                content.to_string(),
                file_name.to_string(),
                mime_type.to_string(),
            ));
        }
    }

    #[test]
    fn extension_lowercased() {
        assert_eq!(extension_of("Draft.FOUNTAIN"), "fountain");
        assert_eq!(extension_of("archive.tar.PDF"), "pdf");
        assert_eq!(extension_of("README"), "readme");
    }

    #[test]
    fn unsupported_format_rejected() {
        assert_eq!(
            detect_import_format("notes.rtf"),
            Err(ImportError::UnsupportedFormat("rtf".to_string()))
        );
        assert_eq!(
            ImportError::UnsupportedFormat("rtf".to_string()).to_string(),
            "Unsupported format: rtf"
        );
    }

    #[test]
    fn import_plain_text() {
        let io = MemoryIo {
            text: "FADE IN:".to_string(),
            ..Default::default()
        };
        assert_eq!(import_text("pilot.fdx", &io).unwrap(), "FADE IN:");
    }

    #[test]
    fn import_pdf_joins_pages() {
        let io = MemoryIo {
            pages: vec![
                vec!["FADE".to_string(), "IN:".to_string()],
                vec!["THE END".to_string()],
            ],
            ..Default::default()
        };
        assert_eq!(import_text("script.pdf", &io).unwrap(), "FADE IN:\nTHE END\n");
    }

    #[test]
    fn text_exports_go_through_collaborator() {
        let io = MemoryIo::default();
        let artifact = export("JOHN\nHi.", ExportFormat::Fountain, &PdfSettings::default());
        assert!(deliver(artifact, &io).is_none());
        let downloads = io.downloads.borrow();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].0, "JOHN\nHi.");
        assert_eq!(downloads[0].1, "Screenplay.fountain");
        assert_eq!(downloads[0].2, "text/plain");
    }

    #[test]
    fn pdf_layout_returned_to_host() {
        let io = MemoryIo::default();
        let artifact = export("FADE IN:", ExportFormat::Pdf, &PdfSettings::default());
        assert!(matches!(
            deliver(artifact, &io),
            Some(ExportArtifact::Pdf { .. })
        ));
        assert!(io.downloads.borrow().is_empty());
    }

    #[test]
    fn default_columns() {
        assert_eq!(PdfSettings::default().columns(), 63);
    }

    #[test]
    fn wrap_respects_columns() {
        let wrapped = wrap_line("aaa bbb ccc", 7);
        assert_eq!(wrapped, vec!["aaa bbb", "ccc"]);
        let hard = wrap_line("abcdefghij", 4);
        assert_eq!(hard, vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("", 10), vec![""]);
    }

    #[test]
    fn wrap_keeps_indentation() {
        let indent = " ".repeat(13);
        let line = format!("{indent}{}", "word ".repeat(20));
        let wrapped = wrap_line(&line, 63);
        assert!(wrapped.len() > 1);
        assert!(wrapped[0].starts_with(&format!("{indent}word")));
        assert!(!wrapped[0].starts_with(&format!("{indent} ")));
        assert!(wrapped.iter().all(|l| l.chars().count() <= 63));
        let words: usize = wrapped.iter().map(|l| l.split_whitespace().count()).sum();
        assert_eq!(words, 20);
    }

    #[test]
    fn layout_title_then_gap() {
        let layout = layout_pdf("FADE IN:", &PdfSettings::default());
        assert_eq!(layout.pages.len(), 1);
        let page = &layout.pages[0];
        assert_eq!(page[0].text, "Screenplay Export");
        assert_eq!(page[0].y, 54.0);
        assert_eq!(page[1].text, "FADE IN:");
        assert_eq!(page[1].y, 86.0);
    }

    #[test]
    fn layout_paginates() {
        let settings = PdfSettings::default();
        let text = vec!["line"; 100].join("\n");
        let layout = layout_pdf(&text, &settings);
        assert!(layout.pages.len() >= 2);
        for page in &layout.pages {
            assert!(page.iter().all(|l| l.y <= settings.page_bottom));
        }
        let total: usize = layout.pages.iter().map(Vec::len).sum();
        assert_eq!(total, 101);
        assert_eq!(layout.pages[1][0].y, settings.margin);
    }
}
