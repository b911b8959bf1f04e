use super::{PipelineError, Player};
use gstreamer as gst;
use tracing::{debug, info};
use udplay_types::BranchSpec;

impl Player {
    /// Link a branch's elements in declared order.
    ///
    /// Linking is atomic per branch: a single failed connection fails
    /// the whole operation. Every element must already be a member of
    /// the pipeline.
    pub(super) fn link_branch(&self, branch: &BranchSpec) -> Result<(), PipelineError> {
        let elements: Vec<&gst::Element> = branch
            .elements
            .iter()
            .map(|spec| {
                self.elements
                    .get(&spec.id)
                    .ok_or_else(|| PipelineError::ElementNotFound(spec.id.clone()))
            })
            .collect::<Result<_, _>>()?;

        debug!(
            "Linking {} element(s) for branch '{}'",
            elements.len(),
            branch.name
        );
        gst::Element::link_many(elements.iter().copied()).map_err(|e| PipelineError::Link {
            branch: branch.name.clone(),
            detail: e.to_string(),
        })?;

        info!(
            "Linked branch '{}': {}",
            branch.name,
            branch
                .elements
                .iter()
                .map(|e| e.id.as_str())
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        Ok(())
    }
}
