//! Layout calculation modules for imposition
//!
//! This module handles everything that can be decided without touching a PDF:
//! - Slot ordering (which source page goes in which half of which output page)
//! - Content placement (scaling, centering, rotation anchor)

mod booklet;
mod cut;
mod placement;
mod types;

pub use booklet::*;
pub use cut::*;
pub use placement::*;
pub use types::*;

use crate::types::PrintMode;

/// Plan the output pages for `total_pages` source pages.
///
/// Pure function of the page count and mode; zero pages yields an empty plan.
pub fn plan_layout(total_pages: usize, mode: PrintMode) -> LayoutPlan {
    let plan = match mode {
        PrintMode::Booklet => booklet_plan(total_pages),
        PrintMode::Cut => cut_plan(total_pages),
    };
    log::debug!(
        "Planned {} source pages as {}: {} output pages on {} sheets",
        total_pages,
        mode,
        plan.page_count(),
        plan.sheet_count()
    );
    plan
}
