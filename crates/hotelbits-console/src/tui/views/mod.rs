//! Board and overlay views.

pub mod board;
pub mod palette;
