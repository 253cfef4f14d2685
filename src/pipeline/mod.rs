// Data pipeline: reference loading and the pure processing steps

pub mod processing;
pub mod reference;

pub use reference::ReferenceData;
