use super::{PipelineError, Player};
use gstreamer as gst;
use gstreamer::prelude::*;
use std::collections::HashMap;
use tracing::{debug, error, info};
use udplay_types::{BranchSpec, CapsSpec, CapsValue, ElementSpec, PropertyValue};

impl Player {
    /// Build a pipeline from branch definitions.
    ///
    /// All elements of all branches are created, configured and added
    /// before any linking happens. Any failure aborts construction.
    pub fn new(branches: &[BranchSpec]) -> Result<Self, PipelineError> {
        let pipeline = gst::Pipeline::builder().name("main-pipeline").build();

        let mut player = Self {
            pipeline,
            elements: HashMap::new(),
            torn_down: false,
        };

        for branch in branches {
            debug!(
                "Adding {} element(s) for branch '{}'",
                branch.elements.len(),
                branch.name
            );
            for element_spec in &branch.elements {
                player.add_element(branch, element_spec)?;
            }
        }

        for branch in branches {
            player.link_branch(branch)?;
        }

        info!(
            "Pipeline assembled: {} element(s) in {} branch(es)",
            player.elements.len(),
            branches.len()
        );
        Ok(player)
    }

    /// Create an element, configure it and add it to the pipeline.
    fn add_element(
        &mut self,
        branch: &BranchSpec,
        spec: &ElementSpec,
    ) -> Result<(), PipelineError> {
        debug!("Creating element {} (type: {})", spec.id, spec.element_type);

        let element = gst::ElementFactory::make(&spec.element_type)
            .name(&spec.id)
            .build()
            .map_err(|e| {
                error!(
                    "Failed to create element {} in branch '{}': {}",
                    spec.id, branch.name, e
                );
                PipelineError::ElementCreation(format!(
                    "{} (branch '{}'): {} - {}",
                    spec.id, branch.name, spec.element_type, e
                ))
            })?;

        // Properties are set once, before linking
        for (prop_name, prop_value) in &spec.properties {
            set_property(&element, &spec.id, prop_name, prop_value)?;
        }

        // The caps value is moved into the property and not reused
        if let Some(caps_spec) = &spec.caps {
            let caps = build_caps(caps_spec);
            debug!("Attaching caps to {}: {}", spec.id, caps);
            element.set_property("caps", caps);
        }

        self.pipeline.add(&element).map_err(|e| {
            error!("Failed to add {} to pipeline: {}", spec.id, e);
            PipelineError::ElementCreation(format!(
                "Failed to add {} to pipeline: {}",
                spec.id, e
            ))
        })?;

        self.elements.insert(spec.id.clone(), element);
        Ok(())
    }
}

/// Build an immutable caps value from its description.
fn build_caps(spec: &CapsSpec) -> gst::Caps {
    let mut builder = gst::Caps::builder(spec.media_type.as_str());
    for (name, value) in &spec.fields {
        builder = match value {
            CapsValue::String(v) => builder.field(name.as_str(), v.as_str()),
            CapsValue::Int(v) => builder.field(name.as_str(), *v),
        };
    }
    builder.build()
}

/// Set a property on an element, converting to the width the property
/// actually expects.
fn set_property(
    element: &gst::Element,
    element_id: &str,
    prop_name: &str,
    prop_value: &PropertyValue,
) -> Result<(), PipelineError> {
    debug!(
        "Setting property: {}.{} = {:?}",
        element_id, prop_name, prop_value
    );

    match prop_value {
        PropertyValue::String(v) => {
            element.set_property_from_str(prop_name, v);
        }
        PropertyValue::Int(v) => {
            let type_name = element
                .find_property(prop_name)
                .map(|pspec| pspec.value_type().name().to_string())
                .unwrap_or_default();
            match type_name.as_str() {
                "gint" | "glong" => {
                    let v32 = i32::try_from(*v).map_err(|_| PipelineError::InvalidProperty {
                        element: element_id.to_string(),
                        property: prop_name.to_string(),
                        reason: format!("Value {} doesn't fit in i32", v),
                    })?;
                    element.set_property(prop_name, v32);
                }
                "guint" | "gulong" => {
                    let v32 = u32::try_from(*v).map_err(|_| PipelineError::InvalidProperty {
                        element: element_id.to_string(),
                        property: prop_name.to_string(),
                        reason: format!("Value {} doesn't fit in u32", v),
                    })?;
                    element.set_property(prop_name, v32);
                }
                "guint64" => {
                    let v64 = u64::try_from(*v).map_err(|_| PipelineError::InvalidProperty {
                        element: element_id.to_string(),
                        property: prop_name.to_string(),
                        reason: format!("Property expects unsigned integer, got {}", v),
                    })?;
                    element.set_property(prop_name, v64);
                }
                _ => {
                    element.set_property(prop_name, *v);
                }
            }
        }
        PropertyValue::UInt(v) => {
            let type_name = element
                .find_property(prop_name)
                .map(|pspec| pspec.value_type().name().to_string())
                .unwrap_or_default();
            if type_name == "guint" || type_name == "gulong" {
                let v32 = u32::try_from(*v).map_err(|_| PipelineError::InvalidProperty {
                    element: element_id.to_string(),
                    property: prop_name.to_string(),
                    reason: format!("Value {} doesn't fit in u32", v),
                })?;
                element.set_property(prop_name, v32);
            } else {
                element.set_property(prop_name, *v);
            }
        }
        PropertyValue::Bool(v) => {
            element.set_property(prop_name, *v);
        }
    }

    Ok(())
}
