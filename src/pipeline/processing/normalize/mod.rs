// Normalization of codes into display names and state abbreviations

pub mod geography;
pub mod names;
pub mod resolvers;
pub mod text;

pub use geography::{classify_location, normalize_locations, GeoNormalization, LocationClass};
pub use names::{resolve_names, NameResolutionSummary};
pub use resolvers::{NameResolver, ResolutionTier, ResolverChain};
pub use text::to_title_case;
