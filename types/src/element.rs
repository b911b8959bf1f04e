//! GStreamer element and property definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for an element instance within a branch.
pub type ElementId = String;

/// Describes one GStreamer element of a branch: its factory type,
/// its properties and an optional caps constraint (for capsfilters).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Unique identifier for this element instance
    pub id: ElementId,
    /// GStreamer element type (e.g., "udpsrc", "h264parse", "autovideosink")
    pub element_type: String,
    /// Element properties as key-value pairs
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    /// Caps constraint bound to the element's `caps` property before it
    /// enters the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caps: Option<CapsSpec>,
}

impl ElementSpec {
    pub fn new(id: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element_type: element_type.into(),
            properties: BTreeMap::new(),
            caps: None,
        }
    }

    /// Add a property to set before the element is linked.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Attach a caps constraint.
    pub fn caps(mut self, caps: CapsSpec) -> Self {
        self.caps = Some(caps);
        self
    }
}

/// Property value that can be various types.
///
/// GStreamer properties can be strings, numbers, booleans, enums, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<u64> for PropertyValue {
    fn from(u: u64) -> Self {
        PropertyValue::UInt(u)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// An immutable description of a simple caps structure
/// (media type plus a flat list of fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapsSpec {
    /// Media type of the structure (e.g., "video/x-raw")
    pub media_type: String,
    /// Field name/value pairs, in declaration order
    pub fields: Vec<(String, CapsValue)>,
}

impl CapsSpec {
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<CapsValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// A caps field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapsValue {
    String(String),
    Int(i32),
}

impl From<&str> for CapsValue {
    fn from(s: &str) -> Self {
        CapsValue::String(s.to_string())
    }
}

impl From<String> for CapsValue {
    fn from(s: String) -> Self {
        CapsValue::String(s)
    }
}

impl From<i32> for CapsValue {
    fn from(i: i32) -> Self {
        CapsValue::Int(i)
    }
}
