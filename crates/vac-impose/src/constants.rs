//! Shared constants for PDF imposition

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Fallback page size when a source page has no usable MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

/// Number of slots on one face of an output sheet
pub const SLOTS_PER_FACE: usize = 2;

/// Output pages per physical sheet (recto + verso)
pub const FACES_PER_SHEET: usize = 2;

/// File name stem used when the source has no usable identifier
pub const DEFAULT_IDENTIFIER: &str = "vac";
