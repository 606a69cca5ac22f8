use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid print mode '{0}' (expected 'booklet' or 'cut')")]
    InvalidMode(String),
    #[error("Source page {index} out of range (document has {page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// How the source pages are arranged on the output sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PrintMode {
    /// Saddle-stitch booklet: fold the printed stack in half and staple
    #[default]
    Booklet,
    /// One source page per output page, opposite a blank half, for cutting
    /// into single-sided cards
    Cut,
}

impl PrintMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PrintMode::Booklet => "booklet",
            PrintMode::Cut => "cut",
        }
    }
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrintMode {
    type Err = ImposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "booklet" => Ok(PrintMode::Booklet),
            "cut" => Ok(PrintMode::Cut),
            _ => Err(ImposeError::InvalidMode(s.to_string())),
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    Portrait,
    /// Landscape: width > height (default, two portrait pages side by side)
    #[default]
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Output sheet size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetSize {
    /// A fixed paper size
    Paper {
        size: PaperSize,
        orientation: Orientation,
    },
    /// Two source pages side by side: twice the first page's width,
    /// same height
    MatchSource,
}

impl Default for SheetSize {
    fn default() -> Self {
        SheetSize::Paper {
            size: PaperSize::A4,
            orientation: Orientation::Landscape,
        }
    }
}

/// Statistics about an imposition plan
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of physical sheets of paper
    pub output_sheets: usize,
    /// Output page count (faces)
    pub output_pages: usize,
    /// Slots left empty across all output pages
    pub blank_slots: usize,
    /// Slots showing a page that already appears elsewhere in the plan
    pub duplicated_slots: usize,
}
