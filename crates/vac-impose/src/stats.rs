use crate::constants::SLOTS_PER_FACE;
use crate::layout::{LayoutPlan, plan_layout};
use crate::types::*;
use lopdf::Document;
use std::collections::HashSet;

/// Calculate statistics for imposing `document` in `mode`
pub fn calculate_statistics(document: &Document, mode: PrintMode) -> ImpositionStatistics {
    let source_pages = document.get_pages().len();
    plan_statistics(source_pages, &plan_layout(source_pages, mode))
}

/// Statistics for an already computed plan
pub fn plan_statistics(source_pages: usize, plan: &LayoutPlan) -> ImpositionStatistics {
    let total_slots = plan.page_count() * SLOTS_PER_FACE;

    let mut seen = HashSet::new();
    let mut placed = 0;
    let mut duplicated_slots = 0;
    for index in plan.placed_pages() {
        placed += 1;
        if !seen.insert(index) {
            duplicated_slots += 1;
        }
    }

    ImpositionStatistics {
        source_pages,
        output_sheets: plan.sheet_count(),
        output_pages: plan.page_count(),
        blank_slots: total_slots - placed,
        duplicated_slots,
    }
}
