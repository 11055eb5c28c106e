use serde::{Deserialize, Serialize};

/// A screenplay element that can be inserted at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatElement {
    Scene,
    Shot,
    Action,
    Character,
    Dialogue,
}

/// Inserted when an element name is not recognised.
pub const FALLBACK_TEMPLATE: &str = "\n";

impl FormatElement {
    /// Parse an element name as sent by a toolbar ("scene", "shot", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "scene" => Some(Self::Scene),
            "shot" => Some(Self::Shot),
            "action" => Some(Self::Action),
            "character" => Some(Self::Character),
            "dialogue" => Some(Self::Dialogue),
            _ => None,
        }
    }

    /// The text inserted for this element.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Scene => "\nINT./EXT. LOCATION - DAY\n",
            Self::Shot => "\nSHOT: \n",
            Self::Action => "\nAction: ",
            Self::Character => "\n             CHARACTER NAME\n",
            Self::Dialogue => "\n             Character\n             Dialogue goes here.\n",
        }
    }
}

/// How an imported file is turned into buffer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    /// Read the file contents as-is.
    PlainText,
    /// Extract text page by page.
    Pdf,
}

impl ImportFormat {
    /// Map a lower-cased extension to an import format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" | "fountain" | "fdx" | "docx" | "doc" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// A download target for the current script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Text,
    Fountain,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Pdf => "Screenplay.pdf",
            Self::Text => "Screenplay.txt",
            Self::Fountain => "Screenplay.fountain",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Text | Self::Fountain => "text/plain",
        }
    }

    /// Notice shown once the export has been handed off.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Pdf => "Exported PDF!",
            Self::Text => "Exported as text file.",
            Self::Fountain => "Exported as Fountain.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_names_case_insensitive() {
        assert_eq!(FormatElement::from_name("Scene"), Some(FormatElement::Scene));
        assert_eq!(FormatElement::from_name("DIALOGUE"), Some(FormatElement::Dialogue));
        assert_eq!(FormatElement::from_name("transition"), None);
    }

    #[test]
    fn scene_template() {
        assert_eq!(FormatElement::Scene.template(), "\nINT./EXT. LOCATION - DAY\n");
    }

    #[test]
    fn import_extensions() {
        for ext in ["txt", "fountain", "fdx", "docx", "doc"] {
            assert_eq!(ImportFormat::from_extension(ext), Some(ImportFormat::PlainText));
        }
        assert_eq!(ImportFormat::from_extension("pdf"), Some(ImportFormat::Pdf));
        assert_eq!(ImportFormat::from_extension("rtf"), None);
        assert_eq!(ImportFormat::from_extension("PDF"), None);
    }

    #[test]
    fn export_targets() {
        assert_eq!(ExportFormat::Fountain.file_name(), "Screenplay.fountain");
        assert_eq!(ExportFormat::Fountain.mime_type(), "text/plain");
        assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
    }
}
