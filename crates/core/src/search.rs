//! # Search Filter
//!
//! Shows list nodes whose search key contains the query and hides the
//! rest. Every call re-evaluates every node; nothing is memoized.

use crate::dom::{Document, NodeId};
use crate::renderer::SEARCH_TERM_ATTRIBUTE;

/// Lower-case the query. Whitespace is kept and takes part in the match.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// Apply `query` to every item of `list`, returning how many stay visible
pub fn apply_filter(doc: &mut Document, list: NodeId, query: &str) -> usize {
    let query = normalize_query(query);
    let items = doc.children(list).to_vec();

    let mut visible = 0;
    for item in items {
        let matches = query.is_empty()
            || doc
                .attribute(item, SEARCH_TERM_ATTRIBUTE)
                .is_some_and(|term| term.contains(&query));
        doc.set_hidden(item, !matches);
        if matches {
            visible += 1;
        }
    }

    tracing::debug!(query = %query, visible, "Applied search filter");
    visible
}

#[cfg(test)]
fn visible_terms(doc: &Document, list: NodeId) -> Vec<String> {
    doc.children(list)
        .iter()
        .filter(|item| !doc.is_hidden(**item))
        .filter_map(|item| doc.attribute(*item, SEARCH_TERM_ATTRIBUTE))
        .map(str::to_string)
        .collect()
}
