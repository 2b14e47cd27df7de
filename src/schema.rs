// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The schema documents searched by this crate are JSON-Schema-like form definitions:
///
/// {
///   "Content": {
///     "type": "object",
///     "properties": {
///       "applicant": {
///         "type": "object",
///         "properties": {
///           "first name": { "type": "string" }
///         }
///       },
///       "phones": {
///         "type": "array",
///         "items": {
///           "properties": {
///             "number": { "type": "string" }
///           }
///         }
///       }
///     }
///   }
/// }
///
/// Only two keys drive the structure:
///     - `properties`: an object mapping field names to nested nodes.
///     - `items`: the element node of an array. It does not name a field.
///
/// Everything else (`type`, `description`, `required`, ...) is ignored, and unknown fields are not
/// an error.
///
/// A node is read as one of three shapes. When a node carries both keys, `properties` wins and
/// `items` is never looked at. Field order follows the document.
use crate::error::Result;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Default key holding the root of the schema tree.
pub const CONTENT_KEY: &str = "Content";

/// Shape of one node in a schema tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SchemaNode {
    /// No `properties` and no `items`.
    #[default]
    Leaf,
    /// `properties` mapping, in declaration order.
    Object(IndexMap<String, SchemaNode>),
    /// `items` element schema.
    Array(Box<SchemaNode>),
}

impl SchemaNode {
    /// Build a node from an already parsed JSON value.
    ///
    /// Values that are not JSON objects are leaves. A `properties` value that is not an object
    /// (`true`, `[]`, ...) is treated as absent and `items` is consulted instead. An `items`
    /// value of `null` is absent too.
    pub fn from_json_value(v: &serde_json::Value) -> Self {
        let Some(fields) = v.as_object() else {
            return SchemaNode::Leaf;
        };

        if let Some(serde_json::Value::Object(properties)) = fields.get("properties") {
            return SchemaNode::Object(
                properties
                    .iter()
                    .map(|(name, child)| (name.clone(), Self::from_json_value(child)))
                    .collect(),
            );
        }

        match fields.get("items") {
            Some(serde_json::Value::Null) | None => SchemaNode::Leaf,
            Some(items) => SchemaNode::Array(Box::new(Self::from_json_value(items))),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v: serde_json::Value = Deserialize::deserialize(deserializer)?;
        Ok(SchemaNode::from_json_value(&v))
    }
}

/// A parsed document, reduced to the tree under its content key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootDocument {
    /// `None` when the document has no content key or is not an object.
    pub content: Option<SchemaNode>,
}

impl RootDocument {
    pub fn new(content: SchemaNode) -> Self {
        Self {
            content: Some(content),
        }
    }

    /// Pick the tree under `content_key` out of a parsed JSON value.
    pub fn from_json_value(v: &serde_json::Value, content_key: &str) -> Self {
        Self {
            content: v.get(content_key).map(SchemaNode::from_json_value),
        }
    }

    /// Parse JSON text strictly and pick the tree under `content_key`.
    pub fn from_json_str(s: &str, content_key: &str) -> Result<Self> {
        let v: serde_json::Value = serde_json::from_str(s)?;
        Ok(Self::from_json_value(&v, content_key))
    }

    /// Root node of the traversal. A missing content key reads as a leaf.
    pub fn content(&self) -> &SchemaNode {
        static EMPTY: SchemaNode = SchemaNode::Leaf;
        self.content.as_ref().unwrap_or(&EMPTY)
    }
}

impl<'de> Deserialize<'de> for RootDocument {
    /// Deserializes using the default [`CONTENT_KEY`].
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v: serde_json::Value = Deserialize::deserialize(deserializer)?;
        Ok(RootDocument::from_json_value(&v, CONTENT_KEY))
    }
}
