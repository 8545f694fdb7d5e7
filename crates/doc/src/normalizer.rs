//! Turns decoded pairs into attributes.

use crate::codec::RawPair;
use crate::protocol::Attribute;
use crate::schema::SchemaLookup;
use tracing::trace;

/// Converts [`RawPair`]s into [`Attribute`]s, asking a [`SchemaLookup`] for the
/// metadata of each field.
#[derive(Clone, Copy)]
pub struct Normalizer<'s> {
    schema: &'s dyn SchemaLookup,
}

impl<'s> Normalizer<'s> {
    pub fn new(schema: &'s dyn SchemaLookup) -> Self {
        Self { schema }
    }

    pub fn normalize(&self, pair: RawPair) -> Attribute {
        let (key, value) = pair.into_parts();
        let value = value.to_text().into_owned();
        let property = self.schema.property_of(&key);

        let attribute = Attribute::new(key, value, property);
        trace!(name = attribute.name(), parameter_type = %attribute.parameter_type(), "normalized attribute");
        attribute
    }

    pub fn normalize_all(&self, pairs: Vec<RawPair>) -> Vec<Attribute> {
        pairs.into_iter().map(|pair| self.normalize(pair)).collect()
    }
}

impl std::fmt::Debug for Normalizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}
