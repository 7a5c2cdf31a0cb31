//! Terminal output for the `adaptcc` binary, styled with
//! [crossterm](https://docs.rs/crossterm).
//!
//! - **[`listing`]** — renderers for the diagnostic log, the adaptive
//!   analysis summary and fix suggestions
//! - **[`theme`]** — centralized color palette used by all renderers

pub mod listing;
pub mod theme;

pub use listing::{print_analysis, print_fixes, print_header, print_log};
