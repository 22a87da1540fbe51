//! Input extension → allowed output extensions.
//!
//! The table is keyed by lowercase input extension. The empty key stands
//! for files that carry no extension at all.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Outputs offered for every word-processing input.
const WORD_PROCESSING_TARGETS: &[&str] = &["pdf", "odt", "html"];

/// Table rows in display order.
const TABLE_ENTRIES: &[(&str, &[&str])] = &[
    ("", &["pdf"]),
    ("pptx", &["pdf"]),
    ("pps", &["pdf"]),
    ("ppsx", &["pdf"]),
    ("tif", &["pdf"]),
    ("tiff", &["pdf"]),
    ("ppt", &["pdf"]),
    ("pdf", &["pdf", "html"]),
    ("html", &["txt"]),
    ("docx", WORD_PROCESSING_TARGETS),
    ("doc", WORD_PROCESSING_TARGETS),
    ("wps", WORD_PROCESSING_TARGETS),
    ("dotx", WORD_PROCESSING_TARGETS),
    ("docm", WORD_PROCESSING_TARGETS),
    ("dotm", WORD_PROCESSING_TARGETS),
    ("dot", WORD_PROCESSING_TARGETS),
    ("odt", &["pdf", "html"]),
    ("xlsx", &["pdf"]),
    ("xls", &["pdf"]),
    ("png", &["pdf"]),
    ("jpg", &["pdf"]),
    ("jpeg", &["pdf"]),
    ("jfif", &["pdf"]),
    ("rtf", &["docx", "txt"]),
];

static CONVERSION_TABLE: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| TABLE_ENTRIES.iter().copied().collect());

/// Broad document family of an input extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFamily {
    /// Writer documents and templates
    WordProcessing,
    /// Calc workbooks
    Spreadsheet,
    /// Impress decks and shows
    Presentation,
    /// Raster images
    Image,
    /// Portable Document Format
    Pdf,
    /// HTML pages
    Web,
    /// Rich Text Format
    RichText,
    /// No extension
    Unknown,
}

impl DocumentFamily {
    /// Classify a table key. Returns `None` for extensions outside the table.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" | "doc" | "wps" | "dotx" | "docm" | "dotm" | "dot" | "odt" => {
                Some(Self::WordProcessing)
            }
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "pptx" | "pps" | "ppsx" | "ppt" => Some(Self::Presentation),
            "tif" | "tiff" | "png" | "jpg" | "jpeg" | "jfif" => Some(Self::Image),
            "pdf" => Some(Self::Pdf),
            "html" => Some(Self::Web),
            "rtf" => Some(Self::RichText),
            "" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Get the display name for this family
    pub fn display_name(&self) -> &str {
        match self {
            Self::WordProcessing => "Word processing",
            Self::Spreadsheet => "Spreadsheet",
            Self::Presentation => "Presentation",
            Self::Image => "Image",
            Self::Pdf => "PDF",
            Self::Web => "Web page",
            Self::RichText => "Rich text",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DocumentFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the conversion table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRule {
    /// Lowercase input extension; empty for extensionless files.
    pub input: &'static str,
    /// Family of the input format.
    pub family: DocumentFamily,
    /// Allowed output extensions, in table order.
    pub outputs: &'static [&'static str],
}

/// Allowed output extensions for an input extension.
///
/// `None` is treated as a file without extension. Unknown extensions yield
/// an empty slice.
pub fn allowed_outputs(extension: Option<&str>) -> &'static [&'static str] {
    let key = extension.unwrap_or_default().to_lowercase();
    CONVERSION_TABLE.get(key.as_str()).copied().unwrap_or(&[])
}

/// Whether the extension is a key of the table (case-insensitive).
pub fn is_supported_input(extension: &str) -> bool {
    CONVERSION_TABLE.contains_key(extension.to_lowercase().as_str())
}

/// Whether `input → output` is listed in the table.
pub fn is_supported_conversion(input: &str, output: &str) -> bool {
    let output = output.to_lowercase();
    allowed_outputs(Some(input)).contains(&output.as_str())
}

/// All table rows in display order.
pub fn rules() -> impl Iterator<Item = ConversionRule> {
    TABLE_ENTRIES.iter().map(|&(input, outputs)| ConversionRule {
        input,
        family: DocumentFamily::from_extension(input).unwrap_or(DocumentFamily::Unknown),
        outputs,
    })
}
