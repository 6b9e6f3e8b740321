//! Page geometry and tile placement, in millimetres.

pub mod grid;

pub use grid::{LayoutCursor, PageGeometry, Placement, plan_placements};
