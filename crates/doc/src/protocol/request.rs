//! The documentation model of one intercepted request.

use crate::protocol::{Attribute, Body, DocResponse, Header};
use http::Method;

/// Everything known about one request, ready to be rendered.
///
/// The model is assembled once per intercepted request and never changes
/// afterwards; [`with_response`](Self::with_response) consumes it and returns
/// a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRequest {
    header: Option<Header>,
    body: Option<Body>,
    method: Method,
    attributes: Vec<Attribute>,
    response: Option<DocResponse>,
}

impl DocRequest {
    pub fn new(method: Method, header: Option<Header>, body: Option<Body>, attributes: Vec<Attribute>) -> Self {
        Self { header, body, method, attributes, response: None }
    }

    #[must_use]
    pub fn with_response(self, response: DocResponse) -> Self {
        Self { response: Some(response), ..self }
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn response(&self) -> Option<&DocResponse> {
        self.response.as_ref()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// True only when there is at least one header line to display.
    pub fn has_header(&self) -> bool {
        self.header.as_ref().is_some_and(Header::has_display_header)
    }

    pub fn has_content_type(&self) -> bool {
        self.content_type().is_some()
    }

    /// The request's `Content-Type`, if it sent a non-empty one.
    pub fn content_type(&self) -> Option<&str> {
        self.header.as_ref().map(Header::content_type).filter(|content_type| !content_type.is_empty())
    }
}
