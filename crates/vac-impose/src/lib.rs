mod constants;
pub mod impose;
pub mod layout;
pub mod naming;
mod options;
pub mod render;
mod stats;
mod types;

pub use impose::{
    compose, compose_to_bytes, impose, impose_bytes, impose_document, load_pdf, load_pdf_bytes,
    save_pdf, save_pdf_bytes,
};
pub use layout::{LayoutPlan, Placement, fit, plan_layout};
pub use naming::output_file_name;
pub use options::*;
pub use stats::{calculate_statistics, plan_statistics};
pub use types::*;
