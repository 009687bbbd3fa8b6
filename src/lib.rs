// Public library interface for areascale.
// The scaling-report binary uses the core modules through it.

pub mod geometry;
pub mod layout;
pub mod render;
pub mod ui;
