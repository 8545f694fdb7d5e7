//! Body decoders that turn a buffered request body into raw key/value pairs.
//!
//! # Architecture
//!
//! - [`AttributeDecoder`]: routes a `Content-Type` to one of the decoders below
//! - [`FormDecoder`]: `application/x-www-form-urlencoded`
//! - [`MultipartDecoder`]: `multipart/form-data`
//! - [`JsonDecoder`]: `application/json`
//!
//! Every decoder produces the same output: an ordered list of [`RawPair`]s that
//! the [`Normalizer`](crate::Normalizer) later turns into attributes.
//!
//! # Failure policy
//!
//! Form and multipart decoding, like content-type parsing, fail with an
//! [`AttributeExtractionError`](crate::protocol::AttributeExtractionError).
//! JSON decoding never fails; an unparsable body yields no pairs.

mod content_type;
mod form_decoder;
mod json_decoder;
mod multipart_decoder;

pub use content_type::AttributeDecoder;
pub use content_type::MediaType;
pub use form_decoder::FormDecoder;
pub use json_decoder::JsonDecoder;
pub use multipart_decoder::MultipartDecoder;

use bytes::Bytes;
use std::borrow::Cow;

/// A decoded field value before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Text taken from a form or json body
    Text(String),
    /// A buffered multipart part payload
    Bytes(Bytes),
}

impl RawValue {
    /// Renders the value as text. Bytes that are not utf8 are replaced lossily.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Text(s) => Cow::Borrowed(s),
            RawValue::Bytes(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

/// One `(key, value)` produced by a decoder, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    key: String,
    value: RawValue,
}

impl RawPair {
    pub fn new<K: Into<String>>(key: K, value: RawValue) -> Self {
        Self { key: key.into(), value }
    }

    pub fn text<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self::new(key, RawValue::Text(value.into()))
    }

    pub fn bytes<K: Into<String>>(key: K, value: Bytes) -> Self {
        Self::new(key, RawValue::Bytes(value))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }

    pub fn into_parts(self) -> (String, RawValue) {
        (self.key, self.value)
    }
}
