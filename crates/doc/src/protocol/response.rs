use crate::protocol::{Body, Header};
use http::StatusCode;

/// The documentation model of the response a handler produced for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocResponse {
    status: StatusCode,
    header: Option<Header>,
    body: Option<Body>,
}

impl DocResponse {
    pub fn new(status: StatusCode, header: Option<Header>, body: Option<Body>) -> Self {
        Self { status, header, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header.as_ref().map(Header::content_type).filter(|content_type| !content_type.is_empty())
    }
}
