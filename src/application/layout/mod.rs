//! Turns aggregates into paginated invoice documents.
//!
//! Everything here is synchronous and deterministic: the same inputs always
//! produce the same pages and draw operations.

pub mod builder;
pub mod compose;
pub mod metrics;
pub mod sections;

use serde::{Deserialize, Serialize};

/// Switches for the optional parts of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub show_activities: bool,
    pub show_amounts: bool,
    pub show_team_summary: bool,
    /// Redraw the table header at the top of continuation pages.
    pub repeat_table_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_activities: true,
            show_amounts: true,
            show_team_summary: true,
            repeat_table_header: false,
        }
    }
}
