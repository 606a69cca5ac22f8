use crate::constants::mm_to_pt;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Imposition configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionOptions {
    /// Booklet or cut cards
    pub mode: PrintMode,
    /// Output sheet size
    pub sheet: SheetSize,
}

impl ImpositionOptions {
    pub fn new(mode: PrintMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let SheetSize::Paper {
            size: PaperSize::Custom {
                width_mm,
                height_mm,
            },
            ..
        } = self.sheet
        {
            let usable = |v: f32| v.is_finite() && v > 0.0;
            if !usable(width_mm) || !usable(height_mm) {
                return Err(ImposeError::Config(format!(
                    "Custom sheet size must be positive, got {} x {} mm",
                    width_mm, height_mm
                )));
            }
        }
        Ok(())
    }

    /// Output sheet (width, height) in points.
    ///
    /// `first_page` is the size of the first source page, used by
    /// [`SheetSize::MatchSource`]; it is ignored for fixed paper sizes.
    pub fn sheet_dimensions_pt(&self, first_page: (f32, f32)) -> (f32, f32) {
        match self.sheet {
            SheetSize::Paper { size, orientation } => {
                let (w, h) = size.dimensions_with_orientation(orientation);
                (mm_to_pt(w), mm_to_pt(h))
            }
            SheetSize::MatchSource => (first_page.0 * 2.0, first_page.1),
        }
    }
}
