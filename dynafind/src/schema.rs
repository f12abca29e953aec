//! Field-existence views over a model's declared schema.
//!
//! Finder validation only ever asks two questions of a schema: "does this
//! field exist?" and "are any fields declared at all?". [`SchemaView`] is
//! that contract; [`FieldSchema`] is the owned implementation, built either
//! from an explicit name list or from a JSON Schema document's `properties`
//! map.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{FinderError, FinderResult};

/// Read-only field-existence contract consumed during finder validation.
///
/// Implementations are never mutated by this crate. Lookups are by exact
/// name; the parser itself probes both the snake_case and camelCase spelling
/// of each segment, so a view only has to answer for the names it actually
/// declares.
pub trait SchemaView {
    /// Whether the schema declares a field under exactly this name.
    fn has_field(&self, name: &str) -> bool;

    /// True when the schema declares no fields at all.
    ///
    /// An empty schema is a configuration error, not a parse failure: the
    /// dispatch layer refuses to construct a [`Finder`](crate::Finder) over
    /// one.
    fn is_empty(&self) -> bool;
}

/// Owned schema view: the declared field names of a single model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    model: String,
    fields: BTreeSet<String>,
}

impl FieldSchema {
    /// Build a schema view from an explicit list of field names.
    ///
    /// Names may be declared in snake_case or camelCase; validation accepts
    /// either spelling.
    pub fn new<S: Into<String>>(model: impl Into<String>, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            model: model.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a schema view from a JSON Schema document.
    ///
    /// Reads the top-level `properties` map, mirroring the shape models
    /// declare for validation. A document without an object-valued
    /// `properties` member is rejected as [`FinderError::MissingSchema`].
    pub fn from_json_schema(model: impl Into<String>, document: &Value) -> FinderResult<Self> {
        let properties = document
            .get("properties")
            .and_then(Value::as_object)
            .ok_or(FinderError::MissingSchema)?;

        Ok(Self {
            model: model.into(),
            fields: properties.keys().cloned().collect(),
        })
    }

    /// The model name this schema describes.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Declared field names, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

impl SchemaView for FieldSchema {
    fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_schema_properties_become_fields() {
        let document = json!({
            "properties": {
                "id": { "type": "integer" },
                "firstName": { "type": "string" },
                "lastName": { "type": "string" },
                "email": { "type": "string" }
            }
        });

        let schema = FieldSchema::from_json_schema("person", &document).unwrap();
        assert_eq!(schema.model(), "person");
        assert!(schema.has_field("firstName"));
        assert!(schema.has_field("email"));
        assert!(!schema.has_field("first_name"));
        assert!(!schema.is_empty());
    }

    #[test]
    fn document_without_properties_is_a_missing_schema() {
        let document = json!({ "type": "object" });
        assert_eq!(
            FieldSchema::from_json_schema("person", &document),
            Err(FinderError::MissingSchema)
        );
    }

    #[test]
    fn empty_properties_yield_an_empty_view() {
        let document = json!({ "properties": {} });
        let schema = FieldSchema::from_json_schema("person", &document).unwrap();
        assert!(schema.is_empty());
    }
}
