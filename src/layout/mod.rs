mod group;
mod matrix;
pub(crate) mod packing;
mod text;
pub(crate) mod types;

pub use group::{CellKey, group_by_cell};
pub use packing::{Packing, marker_radius, pack};
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::RiskSet;
use crate::theme::Theme;

/// One refresh cycle's layout pass: group the extracted items into matrix
/// cells, pack each bucket, and position every cell, marker, axis label and
/// legend entry on the drawing surface.
pub fn compute_layout(set: &RiskSet, theme: &Theme, config: &LayoutConfig) -> Layout {
    matrix::compute_matrix_layout(set, theme, config)
}
