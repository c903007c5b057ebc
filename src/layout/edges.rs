//! Edge synthesis between consecutively placed nodes.

use super::types::DiagramEdge;

/// Path through `ids` in order: `ids[i] -> ids[i + 1]`, ids like `e1-2`.
pub fn chain_edges<S: AsRef<str>>(ids: &[S]) -> Vec<DiagramEdge> {
    ids.windows(2)
        .map(|pair| {
            let (source, target) = (pair[0].as_ref(), pair[1].as_ref());
            DiagramEdge {
                id: format!("e{source}-{target}"),
                source: source.to_string(),
                target: target.to_string(),
            }
        })
        .collect()
}
