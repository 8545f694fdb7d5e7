//! The header part of a documented message.
//!
//! Not every header is worth documenting. Transport headers such as `Host` or
//! `Content-Length` are noise in an API description, and `Content-Type` is
//! already shown next to the section title. [`HiddenHeaders`] names the
//! headers that are left out of the displayed list.

use crate::render::{Render, Template};
use http::{HeaderMap, HeaderName, header};

/// Header names that are never displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenHeaders {
    names: Vec<HeaderName>,
}

impl Default for HiddenHeaders {
    fn default() -> Self {
        Self {
            names: vec![
                header::CONTENT_TYPE,
                header::CONTENT_LENGTH,
                header::HOST,
                header::CONNECTION,
                header::TRANSFER_ENCODING,
                header::USER_AGENT,
                header::ACCEPT_ENCODING,
            ],
        }
    }
}

impl HiddenHeaders {
    /// An empty set, every header is displayed.
    pub fn none() -> Self {
        Self { names: vec![] }
    }

    pub fn insert(&mut self, name: HeaderName) {
        if !self.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn remove(&mut self, name: &HeaderName) {
        self.names.retain(|hidden| hidden != name);
    }

    pub fn contains(&self, name: &HeaderName) -> bool {
        self.names.contains(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    display_header: Vec<String>,
    content_type: String,
}

impl Header {
    pub fn new(headers: &HeaderMap, hidden: &HiddenHeaders) -> Self {
        let display_header = headers
            .iter()
            .filter(|(name, _)| !hidden.contains(name))
            .filter_map(|(name, value)| value.to_str().ok().map(|value| format!("{}: {value}", name.as_str())))
            .collect();

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_owned())
            .unwrap_or_default();

        Self { display_header, content_type }
    }

    /// The `name: value` lines chosen for display, in header map order.
    pub fn display_header(&self) -> &[String] {
        &self.display_header
    }

    pub fn has_display_header(&self) -> bool {
        !self.display_header.is_empty()
    }

    /// The raw `Content-Type` value, empty when the header is missing or not text.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl Render for Header {
    fn render_to(&self, template: &Template, out: &mut String) {
        if !self.has_display_header() {
            return;
        }
        template.section_heading("Headers", out);
        template.block(&self.display_header.join("\n"), out);
    }
}
