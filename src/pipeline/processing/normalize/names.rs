use tracing::{debug, warn};

use super::resolvers::{ResolutionTier, ResolverChain};
use crate::types::CodedRecord;

/// Outcome counts of one name-resolution pass.
/// `exact + parent_fallback + not_found == total` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameResolutionSummary {
    pub total: usize,
    pub exact: usize,
    pub parent_fallback: usize,
    pub not_found: usize,
    /// Codes no resolver could name, in record order
    pub unresolved: Vec<String>,
}

/// Rewrite each record's `name` from its `code`. Records with no match are
/// left exactly as read and reported, never dropped.
pub fn resolve_names(records: &mut [CodedRecord], chain: &ResolverChain) -> NameResolutionSummary {
    let mut summary = NameResolutionSummary {
        total: records.len(),
        ..Default::default()
    };

    for record in records.iter_mut() {
        let code = record.code().unwrap_or_default().to_string();
        match chain.resolve(&code) {
            Some(resolution) => {
                debug!(
                    code = %code,
                    name = %resolution.name,
                    resolver = resolution.resolver,
                    "resolved name"
                );
                match resolution.tier {
                    ResolutionTier::Exact => summary.exact += 1,
                    ResolutionTier::ParentFallback => summary.parent_fallback += 1,
                }
                record.set_name(resolution.name);
            }
            None => {
                warn!("No name found for code \"{}\"", code);
                summary.not_found += 1;
                summary.unresolved.push(code);
            }
        }
    }

    summary
}
