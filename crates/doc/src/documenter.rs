//! The request documenting pipeline.
//!
//! [`RequestDocumenter`] ties the pieces together for one request:
//!
//! 1. the body is duplicated, one copy goes back on the request
//! 2. the `Content-Type` selects a decoder
//! 3. the decoder turns the inspection copy into raw pairs
//! 4. each pair is normalized into an attribute, with schema metadata
//! 5. header, body, method and attributes are assembled into a [`DocRequest`]
//!
//! Every step runs inline in the caller's future; nothing is spawned and no
//! state is shared between requests.

use crate::body::{ReplayBody, duplicate_request, duplicate_response};
use crate::codec::AttributeDecoder;
use crate::normalizer::Normalizer;
use crate::protocol::{
    Attribute, AttributeExtractionError, Body, DocError, DocRequest, DocResponse, Header, HiddenHeaders,
};
use crate::render::Template;
use crate::schema::{NoSchema, SchemaLookup};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, Method, Request, Response, StatusCode};
use http_body::Body as HttpBody;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// What to do when a body cannot be turned into attributes.
///
/// Invalid json is always tolerated and yields no attributes. The policy only
/// decides the fate of an unparsable `Content-Type`, a malformed url-encoded
/// form and a broken multipart stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// Report an [`AttributeExtractionError`]
    #[default]
    Strict,
    /// Log a warning and document the request without attributes
    Lenient,
}

pub struct RequestDocumenter {
    schema: Arc<dyn SchemaLookup + Send + Sync>,
    policy: ExtractionPolicy,
    hidden_headers: HiddenHeaders,
    template: Arc<Template>,
}

impl RequestDocumenter {
    pub fn builder() -> RequestDocumenterBuilder {
        RequestDocumenterBuilder::new()
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.policy
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Documents `req` and hands it back with a replayable body.
    ///
    /// An I/O failure while draining the body is fatal for the request, its body
    /// is lost. An extraction failure is only returned under
    /// [`ExtractionPolicy::Strict`].
    pub async fn document<B>(&self, req: Request<B>) -> Result<(Request<ReplayBody>, DocRequest), DocError>
    where
        B: HttpBody,
        B::Error: Into<Box<dyn Error + Send + Sync>>,
    {
        let (req, body) = duplicate_request(req).await?;
        let doc = self.build_request(req.method(), req.headers(), body).await?;
        Ok((req, doc))
    }

    /// Builds the model of a request whose body has already been buffered.
    pub async fn build_request(
        &self,
        method: &Method,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<DocRequest, AttributeExtractionError> {
        let header = Header::new(headers, &self.hidden_headers);
        let attributes = self.extract_attributes(header.content_type(), &body).await?;
        let body = Body::new(body, header.content_type());

        Ok(DocRequest::new(method.clone(), Some(header), body, attributes))
    }

    /// Routes `body` to the decoder for `content_type` and normalizes what it decodes.
    pub async fn extract_attributes(
        &self,
        content_type: &str,
        body: &Bytes,
    ) -> Result<Vec<Attribute>, AttributeExtractionError> {
        let pairs = match AttributeDecoder::route(content_type) {
            Ok(Some(decoder)) => decoder.decode(body).await,
            Ok(None) => Ok(vec![]),
            Err(e) => Err(e),
        };

        let pairs = match pairs {
            Ok(pairs) => pairs,
            Err(e) if self.policy == ExtractionPolicy::Lenient => {
                warn!(cause = %e, content_type, "can't extract attributes, documenting without them");
                vec![]
            }
            Err(e) => return Err(e),
        };

        Ok(Normalizer::new(&*self.schema).normalize_all(pairs))
    }

    /// Documents `resp` and hands it back with a replayable body.
    pub async fn document_response<B>(&self, resp: Response<B>) -> Result<(Response<ReplayBody>, DocResponse), DocError>
    where
        B: HttpBody,
        B::Error: Into<Box<dyn Error + Send + Sync>>,
    {
        let (resp, body) = duplicate_response(resp).await?;
        let doc = self.build_response(resp.status(), resp.headers(), body);
        Ok((resp, doc))
    }

    pub fn build_response(&self, status: StatusCode, headers: &HeaderMap, body: Bytes) -> DocResponse {
        let header = Header::new(headers, &self.hidden_headers);
        let body = Body::new(body, header.content_type());
        DocResponse::new(status, Some(header), body)
    }

    pub fn render(&self, doc: &DocRequest) -> String {
        self.template.render_request(doc)
    }
}

impl fmt::Debug for RequestDocumenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDocumenter")
            .field("policy", &self.policy)
            .field("hidden_headers", &self.hidden_headers)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

pub struct RequestDocumenterBuilder {
    schema: Option<Arc<dyn SchemaLookup + Send + Sync>>,
    policy: ExtractionPolicy,
    hidden_headers: HiddenHeaders,
    template: Option<Arc<Template>>,
}

impl RequestDocumenterBuilder {
    fn new() -> Self {
        Self { schema: None, policy: ExtractionPolicy::default(), hidden_headers: HiddenHeaders::default(), template: None }
    }

    #[must_use]
    pub fn schema<S: SchemaLookup + Send + Sync + 'static>(mut self, schema: S) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    #[must_use]
    pub fn shared_schema(mut self, schema: Arc<dyn SchemaLookup + Send + Sync>) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: ExtractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn hidden_headers(mut self, hidden_headers: HiddenHeaders) -> Self {
        self.hidden_headers = hidden_headers;
        self
    }

    #[must_use]
    pub fn hidden_header(mut self, name: HeaderName) -> Self {
        self.hidden_headers.insert(name);
        self
    }

    #[must_use]
    pub fn show_header(mut self, name: &HeaderName) -> Self {
        self.hidden_headers.remove(name);
        self
    }

    #[must_use]
    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(Arc::new(template));
        self
    }

    #[must_use]
    pub fn shared_template(mut self, template: Arc<Template>) -> Self {
        self.template = Some(template);
        self
    }

    pub fn build(self) -> RequestDocumenter {
        RequestDocumenter {
            schema: self.schema.unwrap_or_else(|| Arc::new(NoSchema)),
            policy: self.policy,
            hidden_headers: self.hidden_headers,
            template: self.template.unwrap_or_default(),
        }
    }
}

impl fmt::Debug for RequestDocumenterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDocumenterBuilder")
            .field("policy", &self.policy)
            .field("hidden_headers", &self.hidden_headers)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
