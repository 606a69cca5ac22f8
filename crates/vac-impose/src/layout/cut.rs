//! Cut-card ordering
//!
//! One source page per output page, always opposite a blank half.
//! Pages are taken alternately from the head (right half) and the tail
//! (left half) of the source. Printed duplex, the blank half of each page
//! backs the printed half of its neighbour, so cutting the sheet along the
//! centre line yields cards with one printed side each.
//!
//! **8 pages (1-based):**
//! ```text
//! out 1: [  ][1 ]   out 2: [8↓][  ]
//! out 3: [  ][2 ]   out 4: [7↓][  ]
//! out 5: [  ][3 ]   out 6: [6↓][  ]
//! out 7: [  ][4 ]   out 8: [5↓][  ]
//! ```

use crate::types::PrintMode;

use super::{Face, FaceLayout, LayoutPlan, SlotAssignment};

/// Build the cut plan for `total_pages` source pages.
pub fn cut_plan(total_pages: usize) -> LayoutPlan {
    let mut faces = Vec::with_capacity(total_pages);

    let mut lo: isize = 0;
    let mut hi: isize = total_pages as isize - 1;
    let mut use_tail_next = false;
    let mut output_page = 0usize;

    while lo <= hi {
        // Odd output pages land on the back of the sheet
        let on_back = output_page % 2 == 1;
        let face = if on_back { Face::Verso } else { Face::Recto };

        let layout = if use_tail_next {
            let layout = FaceLayout {
                face,
                left: SlotAssignment::page(hi as usize, on_back),
                right: SlotAssignment::blank(),
            };
            hi -= 1;
            layout
        } else {
            let layout = FaceLayout {
                face,
                left: SlotAssignment::blank(),
                right: SlotAssignment::page(lo as usize, on_back),
            };
            lo += 1;
            layout
        };

        faces.push(layout);
        use_tail_next = !use_tail_next;
        output_page += 1;
    }

    LayoutPlan {
        mode: PrintMode::Cut,
        faces,
    }
}
