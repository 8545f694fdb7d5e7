//! API-Blueprint rendering.
//!
//! A [`Template`] is built once, usually at start up, and passed explicitly to
//! whoever renders. Rendering never mutates the model: the same model and the
//! same template always produce the same text.
//!
//! A fully populated request renders like this:
//!
//! ```text
//! + Request (application/json)
//!
//!     + Headers
//!
//!             Authorization: Bearer abc
//!
//!     + Attributes
//!
//!         + name: `Alice` (string, required) - user name
//!         + age: `30` (number, optional)
//!
//!     + Body
//!
//!             {
//!               "name": "Alice",
//!               "age": 30
//!             }
//! ```
//!
//! Sections with nothing to show are left out entirely, and a request with no
//! body and no displayable header renders to nothing.

use crate::protocol::{DocRequest, DocResponse};

const DEFAULT_INDENT: &str = "    ";
const DEFAULT_ATTRIBUTES_TITLE: &str = "Attributes";

/// A model part that knows how to write its own documentation block.
pub trait Render {
    fn render_to(&self, template: &Template, out: &mut String);

    fn render(&self, template: &Template) -> String {
        let mut out = String::new();
        self.render_to(template, &mut out);
        out
    }
}

/// The fixed request/response layout, plus its few knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    indent: String,
    attributes_title: String,
}

impl Default for Template {
    fn default() -> Self {
        Self { indent: DEFAULT_INDENT.to_owned(), attributes_title: DEFAULT_ATTRIBUTES_TITLE.to_owned() }
    }
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// The indentation for nesting `level`.
    pub fn indent(&self, level: usize) -> String {
        self.indent.repeat(level)
    }

    /// Writes `+ <title>` at section level followed by a blank line.
    pub(crate) fn section_heading(&self, title: &str, out: &mut String) {
        out.push_str(&self.indent(1));
        out.push_str("+ ");
        out.push_str(title);
        out.push_str("\n\n");
    }

    /// Writes every line of `text` as a pre-formatted block under a section.
    pub(crate) fn block(&self, text: &str, out: &mut String) {
        let indent = self.indent(3);
        for line in text.lines() {
            if !line.is_empty() {
                out.push_str(&indent);
                out.push_str(line);
            }
            out.push('\n');
        }
    }

    pub fn render_request(&self, request: &DocRequest) -> String {
        let mut out = String::new();

        if request.has_body() || request.has_header() {
            out.push_str("+ Request");
            if let Some(content_type) = request.content_type() {
                out.push_str(" (");
                out.push_str(content_type);
                out.push(')');
            }
            out.push('\n');

            if let Some(header) = request.header().filter(|_| request.has_header()) {
                out.push('\n');
                header.render_to(self, &mut out);
            }

            if !request.attributes().is_empty() {
                out.push('\n');
                self.section_heading(&self.attributes_title, &mut out);
                for attribute in request.attributes() {
                    attribute.render_to(self, &mut out);
                }
            }

            if let Some(body) = request.body() {
                out.push('\n');
                body.render_to(self, &mut out);
            }
        }

        if let Some(response) = request.response() {
            if !out.is_empty() {
                out.push('\n');
            }
            self.render_response_to(response, &mut out);
        }

        out
    }

    pub fn render_response(&self, response: &DocResponse) -> String {
        let mut out = String::new();
        self.render_response_to(response, &mut out);
        out
    }

    fn render_response_to(&self, response: &DocResponse, out: &mut String) {
        out.push_str("+ Response ");
        out.push_str(response.status().as_str());
        if let Some(content_type) = response.content_type() {
            out.push_str(" (");
            out.push_str(content_type);
            out.push(')');
        }
        out.push('\n');

        if let Some(header) = response.header().filter(|header| header.has_display_header()) {
            out.push('\n');
            header.render_to(self, out);
        }

        if let Some(body) = response.body() {
            out.push('\n');
            body.render_to(self, out);
        }
    }
}

#[derive(Debug, Default)]
pub struct TemplateBuilder {
    indent: Option<String>,
    attributes_title: Option<String>,
}

impl TemplateBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// One level of indentation, four spaces by default.
    #[must_use]
    pub fn indent<S: Into<String>>(mut self, indent: S) -> Self {
        self.indent = Some(indent.into());
        self
    }

    #[must_use]
    pub fn attributes_title<S: Into<String>>(mut self, title: S) -> Self {
        self.attributes_title = Some(title.into());
        self
    }

    pub fn build(self) -> Template {
        let default = Template::default();
        Template {
            indent: self.indent.unwrap_or(default.indent),
            attributes_title: self.attributes_title.unwrap_or(default.attributes_title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Attribute, Body, Header, HiddenHeaders};
    use crate::schema::Property;
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
    use indoc::indoc;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers
    }

    fn full_request() -> DocRequest {
        let header = Header::new(&json_headers(), &HiddenHeaders::default());
        let body = Body::new(Bytes::from_static(br#"{"name":"Alice","age":30}"#), "application/json");
        let attributes = vec![
            Attribute::new("name", "Alice", Property::new("user name").required(true)),
            Attribute::new("age", "30", Property::default()),
        ];
        DocRequest::new(Method::POST, Some(header), body, attributes)
    }

    #[test]
    fn render_full_request() {
        let rendered = Template::default().render_request(&full_request());

        assert_eq!(
            rendered,
            indoc! {r#"
            + Request (application/json)

                + Headers

                        authorization: Bearer abc

                + Attributes

                    + name: `Alice` (string, required) - user name
                    + age: `30` (number, optional)

                + Body

                        {
                          "name": "Alice",
                          "age": 30
                        }
            "#}
        );
    }

    #[test]
    fn render_empty_request() {
        let request = DocRequest::new(Method::GET, None, None, vec![]);

        assert!(Template::default().render_request(&request).is_empty());
    }

    #[test]
    fn render_hidden_only_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        let request = DocRequest::new(Method::GET, Some(Header::new(&headers, &HiddenHeaders::default())), None, vec![]);

        assert!(Template::default().render_request(&request).trim().is_empty());
    }

    #[test]
    fn render_is_idempotent() {
        let template = Template::default();
        let request = full_request();

        assert_eq!(template.render_request(&request), template.render_request(&request));
    }

    #[test]
    fn render_with_custom_template() {
        let template = Template::builder().indent("  ").attributes_title("Parameters").build();
        let body = Body::new(Bytes::from_static(b"a=1"), "application/x-www-form-urlencoded");
        let request = DocRequest::new(Method::POST, None, body, vec![Attribute::new("a", "1", Property::default())]);

        assert_eq!(
            template.render_request(&request),
            indoc! {r#"
            + Request

              + Parameters

                + a: `1` (number, optional)

              + Body

                  a=1
            "#}
        );
    }

    #[test]
    fn render_response_after_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let response = DocResponse::new(
            StatusCode::CREATED,
            Some(Header::new(&headers, &HiddenHeaders::default())),
            Body::new(Bytes::from_static(b"created"), "text/plain"),
        );
        let request = DocRequest::new(Method::POST, None, None, vec![]).with_response(response);

        assert_eq!(
            Template::default().render_request(&request),
            indoc! {r#"
            + Response 201 (text/plain)

                + Body

                        created
            "#}
        );
    }
}
