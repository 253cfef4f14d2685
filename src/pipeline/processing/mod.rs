// Pipeline processing: name and geography normalization, enrichment, rollups and exports

pub mod comparisons;
pub mod enrich;
pub mod export;
pub mod families;
pub mod format;
pub mod normalize;
