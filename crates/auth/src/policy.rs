//! Policy consolidation: merge role path sets with allow-over-deny resolution.

use gatehouse_core::RoleDefinition;

/// Merged allow/deny path sets for one decision.
///
/// Duplicates are collapsed with first-seen order preserved, so output is
/// deterministic for a given input order while set *contents* stay
/// independent of input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedPolicy {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
}

/// Merge the path sets of the given role definitions.
///
/// Every pattern present in both the allow union and the deny union is
/// removed from deny: allow always wins on an *exact* pattern match. Patterns
/// are compared as opaque strings; no wildcard containment is considered, so
/// a deny of `/foo/*` does not suppress an allow of `/foo/bar`. Policy
/// authors must not issue overlapping-but-not-identical allow/deny patterns
/// for the same role set.
pub fn consolidate(definitions: &[RoleDefinition]) -> ConsolidatedPolicy {
    let mut allow: Vec<String> = Vec::new();
    let mut deny: Vec<String> = Vec::new();

    for definition in definitions {
        for path in &definition.paths.allow {
            if !allow.contains(path) {
                allow.push(path.clone());
            }
        }
        for path in &definition.paths.deny {
            if !deny.contains(path) {
                deny.push(path.clone());
            }
        }
    }

    deny.retain(|path| !allow.contains(path));

    ConsolidatedPolicy { allow, deny }
}
