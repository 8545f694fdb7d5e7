use crate::codec::MediaType;
use crate::render::{Render, Template};
use bytes::Bytes;
use serde_json::Value;

/// The displayable body of a documented message.
///
/// Only text bodies are documented. Json bodies are pretty-printed when they
/// parse; every other text body is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    raw: Bytes,
    text: String,
}

impl Body {
    /// Returns `None` for an empty body or one that is not utf8.
    pub fn new(raw: Bytes, content_type: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let text = std::str::from_utf8(&raw).ok()?;
        let text = if is_json(content_type) { pretty_json(text) } else { text.to_owned() };

        Some(Self { raw, text })
    }

    /// The bytes exactly as they were sent.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// The text that gets rendered.
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn is_json(content_type: &str) -> bool {
    MediaType::parse(content_type).is_ok_and(|media_type| {
        media_type.essence() == mime::APPLICATION_JSON.essence_str() || media_type.essence().ends_with("+json")
    })
}

fn pretty_json(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| text.to_owned())
}

impl Render for Body {
    fn render_to(&self, template: &Template, out: &mut String) {
        template.section_heading("Body", out);
        template.block(&self.text, out);
    }
}
