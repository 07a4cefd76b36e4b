pub mod directions;
pub mod elevation;
pub mod selector;
