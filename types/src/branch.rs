//! Branch topology definitions.

use crate::element::ElementSpec;
use serde::{Deserialize, Serialize};

/// One linear chain of elements.
///
/// Links are implied by element order: each element's source side is
/// connected to the next element's sink side. There is no branching or
/// merging within a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSpec {
    /// Branch name, used in diagnostics ("video", "audio")
    pub name: String,
    /// Elements in link order
    pub elements: Vec<ElementSpec>,
}

impl BranchSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    /// Append an element to the end of the chain.
    pub fn element(mut self, spec: ElementSpec) -> Self {
        self.elements.push(spec);
        self
    }

    /// Consecutive element pairs in link order.
    pub fn link_pairs(&self) -> impl Iterator<Item = (&ElementSpec, &ElementSpec)> {
        self.elements.iter().zip(self.elements.iter().skip(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_preserves_element_order() {
        let branch = BranchSpec::new("video")
            .element(ElementSpec::new("a", "udpsrc"))
            .element(ElementSpec::new("b", "h264parse"))
            .element(ElementSpec::new("c", "autovideosink"));

        let ids: Vec<&str> = branch.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn link_pairs_follow_declaration_order() {
        let branch = BranchSpec::new("video")
            .element(ElementSpec::new("a", "udpsrc"))
            .element(ElementSpec::new("b", "h264parse"))
            .element(ElementSpec::new("c", "autovideosink"));

        let pairs: Vec<(&str, &str)> = branch
            .link_pairs()
            .map(|(from, to)| (from.id.as_str(), to.id.as_str()))
            .collect();
        assert_eq!(pairs, [("a", "b"), ("b", "c")]);
    }

    #[test]
    fn empty_branch_has_no_pairs() {
        let branch = BranchSpec::new("empty");
        assert_eq!(branch.link_pairs().count(), 0);
    }
}
