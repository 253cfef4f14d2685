use std::collections::HashMap;

use super::text::to_title_case;
use crate::constants::PARENT_CODE_LEN;
use crate::pipeline::reference::ReferenceData;

/// How closely a resolved name matches the record's own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    /// The code itself was found.
    Exact,
    /// Only the parent agency could be named.
    ParentFallback,
}

/// One strategy in the fallback chain: `code -> Option<name>`.
pub trait NameResolver {
    fn resolve(&self, code: &str) -> Option<String>;

    fn tier(&self) -> ResolutionTier;

    /// Short label used in debug logs
    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub tier: ResolutionTier,
    pub resolver: &'static str,
}

/// The two-character parent agency prefix of a code (`"DJ15" -> "DJ"`).
pub fn parent_code(code: &str) -> &str {
    match code.char_indices().nth(PARENT_CODE_LEN) {
        Some((idx, _)) => &code[..idx],
        None => code,
    }
}

fn non_empty<'a>(names: &'a HashMap<String, String>, code: &str) -> Option<&'a String> {
    names.get(code).filter(|name| !name.is_empty())
}

/// Tier 1: exact subagency code, title-cased from the source casing.
pub struct SubagencyResolver<'a> {
    names: &'a HashMap<String, String>,
}

impl<'a> SubagencyResolver<'a> {
    pub fn new(names: &'a HashMap<String, String>) -> Self {
        Self { names }
    }
}

impl NameResolver for SubagencyResolver<'_> {
    fn resolve(&self, code: &str) -> Option<String> {
        non_empty(self.names, code).map(|name| to_title_case(name))
    }

    fn tier(&self) -> ResolutionTier {
        ResolutionTier::Exact
    }

    fn label(&self) -> &'static str {
        "subagency"
    }
}

/// Tier 2: exact top-level agency code. Agency names are already display
/// cased and pass through unchanged.
pub struct AgencyResolver<'a> {
    names: &'a HashMap<String, String>,
}

impl<'a> AgencyResolver<'a> {
    pub fn new(names: &'a HashMap<String, String>) -> Self {
        Self { names }
    }
}

impl NameResolver for AgencyResolver<'_> {
    fn resolve(&self, code: &str) -> Option<String> {
        non_empty(self.names, code).cloned()
    }

    fn tier(&self) -> ResolutionTier {
        ResolutionTier::Exact
    }

    fn label(&self) -> &'static str {
        "agency"
    }
}

/// Tier 3: the parent prefix names a top-level agency.
pub struct ParentAgencyResolver<'a> {
    names: &'a HashMap<String, String>,
}

impl<'a> ParentAgencyResolver<'a> {
    pub fn new(names: &'a HashMap<String, String>) -> Self {
        Self { names }
    }
}

impl NameResolver for ParentAgencyResolver<'_> {
    fn resolve(&self, code: &str) -> Option<String> {
        non_empty(self.names, parent_code(code)).cloned()
    }

    fn tier(&self) -> ResolutionTier {
        ResolutionTier::ParentFallback
    }

    fn label(&self) -> &'static str {
        "parent_agency"
    }
}

/// Tier 4: a subagency listing exists for the parent prefix; use the parent
/// name it declares.
pub struct ParentListingResolver<'a> {
    parent_names: &'a HashMap<String, String>,
}

impl<'a> ParentListingResolver<'a> {
    pub fn new(parent_names: &'a HashMap<String, String>) -> Self {
        Self { parent_names }
    }
}

impl NameResolver for ParentListingResolver<'_> {
    fn resolve(&self, code: &str) -> Option<String> {
        self.parent_names
            .get(parent_code(code))
            .map(|name| to_title_case(name))
    }

    fn tier(&self) -> ResolutionTier {
        ResolutionTier::ParentFallback
    }

    fn label(&self) -> &'static str {
        "parent_listing"
    }
}

/// Ordered resolvers; the first one that yields a name wins.
pub struct ResolverChain<'a> {
    resolvers: Vec<Box<dyn NameResolver + 'a>>,
}

impl<'a> ResolverChain<'a> {
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Subagency, agency, parent agency, parent listing.
    pub fn standard(reference: &'a ReferenceData) -> Self {
        let mut chain = Self::new();
        chain.push(Box::new(SubagencyResolver::new(&reference.subagency_names)));
        chain.push(Box::new(AgencyResolver::new(&reference.agency_names)));
        chain.push(Box::new(ParentAgencyResolver::new(&reference.agency_names)));
        chain.push(Box::new(ParentListingResolver::new(&reference.parent_names)));
        chain
    }

    pub fn push(&mut self, resolver: Box<dyn NameResolver + 'a>) {
        self.resolvers.push(resolver);
    }

    pub fn resolve(&self, code: &str) -> Option<Resolution> {
        self.resolvers.iter().find_map(|resolver| {
            resolver.resolve(code).map(|name| Resolution {
                name,
                tier: resolver.tier(),
                resolver: resolver.label(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverChain<'_> {
    fn default() -> Self {
        Self::new()
    }
}
