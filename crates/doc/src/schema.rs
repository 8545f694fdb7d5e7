//! Field metadata lookup.
//!
//! Decoded bodies only say what a client sent. The human part of the
//! documentation, a description, whether the field is required and its default,
//! comes from a [`SchemaLookup`] keyed by field name.
//!
//! A [`StaticSchema`] can be loaded from json:
//!
//! ```
//! use micro_doc::schema::{SchemaLookup, StaticSchema};
//!
//! let schema = StaticSchema::from_json_str(r#"{
//!     "name": { "description": "user name", "required": true },
//!     "zip":  { "description": "postal code", "default": "00000" }
//! }"#).unwrap();
//!
//! let name = schema.property_of("name");
//! assert_eq!(name.description(), "user name");
//! assert!(name.is_required());
//! assert_eq!(schema.property_of("zip").default_value(), "00000");
//! assert_eq!(schema.property_of("unknown").description(), "");
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Human-authored metadata for one field.
///
/// The [`Default`] value, empty description, not required, no default, is what
/// an unknown field resolves to.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Property {
    description: String,
    required: bool,
    #[serde(rename = "default")]
    default_value: String,
}

impl Property {
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self { description: description.into(), ..Self::default() }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_default<S: Into<String>>(mut self, default_value: S) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn into_parts(self) -> (String, bool, String) {
        (self.description, self.required, self.default_value)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SchemaLookup {
    fn property_of(&self, name: &str) -> Property;
}

impl<F> SchemaLookup for F
where
    F: Fn(&str) -> Property,
{
    fn property_of(&self, name: &str) -> Property {
        self(name)
    }
}

/// A lookup that knows nothing; every field resolves to [`Property::default`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSchema;

impl SchemaLookup for NoSchema {
    fn property_of(&self, _name: &str) -> Property {
        Property::default()
    }
}

/// A lookup backed by an in-memory map, usually loaded from a json document.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct StaticSchema {
    properties: HashMap<String, Property>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_property<S: Into<String>>(mut self, name: S, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl SchemaLookup for StaticSchema {
    fn property_of(&self, name: &str) -> Property {
        self.properties.get(name).cloned().unwrap_or_default()
    }
}
