//! Content placement within slots
//!
//! Fits a source page into a slot rectangle: uniform scale, never
//! distorting the aspect ratio, centered on both axes.

use super::Rect;

/// Position and size at which a source page is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Left edge of the drawn content
    pub x: f32,
    /// Bottom edge of the drawn content
    pub y: f32,
    /// Width after scaling
    pub width: f32,
    /// Height after scaling
    pub height: f32,
    /// Uniform scale factor applied to the source page
    pub scale: f32,
    /// Drawn upside down (180°)
    pub rotated: bool,
}

impl Placement {
    /// Same box, drawn rotated 180° when `rotated` is set
    pub fn with_rotation(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    /// Visual bounding box of the drawn content
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Insertion point for the drawing primitive.
    ///
    /// Rotation pivots around the insertion point, so a 180° page must be
    /// inserted at the far corner of its box for the rotated content to land
    /// back on `[x, x + width] × [y, y + height]`.
    pub fn anchor(&self) -> (f32, f32) {
        if self.rotated {
            (self.x + self.width, self.y + self.height)
        } else {
            (self.x, self.y)
        }
    }

    pub fn rotation_degrees(&self) -> f32 {
        if self.rotated { 180.0 } else { 0.0 }
    }

    /// PDF `cm` operands `[a b c d e f]` mapping source page space onto the
    /// output page
    pub fn transform(&self) -> [f32; 6] {
        let (ax, ay) = self.anchor();
        let s = if self.rotated { -self.scale } else { self.scale };
        [s, 0.0, 0.0, s, ax, ay]
    }
}

/// Fit a source page of the given size into `target`.
///
/// A degenerate source (zero, negative or non-finite size) collapses to a
/// zero-size placement at the target centre.
pub fn fit(source_width: f32, source_height: f32, target: &Rect) -> Placement {
    let scale = calculate_scale(source_width, source_height, target.width, target.height);

    let scaled_width = source_width * scale;
    let scaled_height = source_height * scale;

    Placement {
        x: target.x + (target.width - scaled_width) / 2.0,
        y: target.y + (target.height - scaled_height) / 2.0,
        width: scaled_width,
        height: scaled_height,
        scale,
        rotated: false,
    }
}

/// Calculate scale factor for fitting source to target dimensions.
fn calculate_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(src_width) || !usable(src_height) {
        return 0.0;
    }

    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h).max(0.0)
}
