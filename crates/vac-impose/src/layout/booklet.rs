//! Saddle-stitch booklet ordering
//!
//! Each sheet carries the outermost pages not yet placed on its front and
//! the next-outermost on its back. Once the stack is folded in half the
//! pages read in order.
//!
//! **8 pages (1-based):**
//! - Sheet 1 recto: [8, 1]   verso: [7↓, 2↓]
//! - Sheet 2 recto: [6, 3]   verso: [5↓, 4↓]
//! - Verso pages rotated 180° so they come out upright after duplex
//!   printing on the short edge

use crate::types::PrintMode;

use super::{Face, FaceLayout, LayoutPlan, SlotAssignment};

/// Build the booklet plan for `total_pages` source pages.
///
/// Page counts that are not a multiple of four repeat pages on the last
/// sheet. With `lo == hi` that page is drawn in both recto slots and the
/// verso is blank; with `hi - lo` of 1 or 2 the verso repeats pages already
/// on the sheet.
pub fn booklet_plan(total_pages: usize) -> LayoutPlan {
    let mut faces = Vec::with_capacity(total_pages.div_ceil(4) * 2);

    // Signed cursors so `hi` can step below zero on the last sheet
    let mut lo: isize = 0;
    let mut hi: isize = total_pages as isize - 1;

    while lo <= hi {
        faces.push(FaceLayout {
            face: Face::Recto,
            left: SlotAssignment::page(hi as usize, false),
            right: SlotAssignment::page(lo as usize, false),
        });

        faces.push(FaceLayout {
            face: Face::Verso,
            left: occupied_if(hi - 1 >= lo, hi - 1),
            right: occupied_if(lo + 1 <= hi, lo + 1),
        });

        lo += 2;
        hi -= 2;
    }

    LayoutPlan {
        mode: PrintMode::Booklet,
        faces,
    }
}

fn occupied_if(condition: bool, index: isize) -> SlotAssignment {
    if condition {
        SlotAssignment::page(index as usize, true)
    } else {
        SlotAssignment::blank()
    }
}
