//! Wrapping handlers so that the traffic they serve gets documented.

use crate::body::{ReplayBody, duplicate_request, duplicate_response};
use crate::documenter::RequestDocumenter;
use crate::handler::{DocEntry, DocSink, Handler};
use async_trait::async_trait;
use http::{Request, Response};
use http_body::Body;
use std::error::Error;
use std::sync::Arc;
use tracing::warn;

/// Turns one value into another, usually a handler into a richer handler.
pub trait Decorator<In> {
    type Out;

    fn decorate(&self, raw: In) -> Self::Out;
}

/// Wraps handlers into [`DocHandler`]s sharing one documenter and one sink.
#[derive(Debug)]
pub struct DocDecorator<S> {
    documenter: Arc<RequestDocumenter>,
    sink: Arc<S>,
}

impl<S> DocDecorator<S> {
    pub fn new(documenter: RequestDocumenter, sink: S) -> Self {
        Self { documenter: Arc::new(documenter), sink: Arc::new(sink) }
    }

    pub fn from_shared(documenter: Arc<RequestDocumenter>, sink: Arc<S>) -> Self {
        Self { documenter, sink }
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }
}

impl<S> Clone for DocDecorator<S> {
    fn clone(&self) -> Self {
        Self { documenter: Arc::clone(&self.documenter), sink: Arc::clone(&self.sink) }
    }
}

impl<H, S> Decorator<H> for DocDecorator<S> {
    type Out = DocHandler<H, S>;

    fn decorate(&self, raw: H) -> Self::Out {
        DocHandler { handler: raw, documenter: Arc::clone(&self.documenter), sink: Arc::clone(&self.sink) }
    }
}

/// A handler that documents every exchange before passing the response on.
///
/// Documenting never changes what the client sees: an extraction failure is
/// logged and the exchange goes undocumented. Only a failure to read a body
/// is returned, since the body is gone by then.
#[derive(Debug)]
pub struct DocHandler<H, S> {
    handler: H,
    documenter: Arc<RequestDocumenter>,
    sink: Arc<S>,
}

impl<H, S> DocHandler<H, S> {
    pub fn inner(&self) -> &H {
        &self.handler
    }
}

#[async_trait]
impl<H, S, ReqBody> Handler<ReqBody> for DocHandler<H, S>
where
    ReqBody: Body + Send + 'static,
    ReqBody::Data: Send,
    ReqBody::Error: Into<Box<dyn Error + Send + Sync>>,
    H: Handler<ReplayBody> + Send + Sync,
    H::RespBody: Send,
    <H::RespBody as Body>::Data: Send,
    <H::RespBody as Body>::Error: Into<Box<dyn Error + Send + Sync>>,
    H::Error: Send,
    S: DocSink + Send + Sync,
{
    type RespBody = ReplayBody;
    type Error = Box<dyn Error + Send + Sync>;

    async fn call(&self, req: Request<ReqBody>) -> Result<Response<Self::RespBody>, Self::Error> {
        let (req, body) = duplicate_request(req).await?;
        let method = req.method().clone();
        let uri = req.uri().clone();

        let doc = match self.documenter.build_request(&method, req.headers(), body).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(cause = %e, %method, %uri, "can't document request, passing it through");
                None
            }
        };

        let resp = self.handler.call(req).await.map_err(Into::into)?;
        let (resp, body) = duplicate_response(resp).await?;

        if let Some(doc) = doc {
            let response = self.documenter.build_response(resp.status(), resp.headers(), body);
            let doc = doc.with_response(response);
            let rendered = self.documenter.render(&doc);
            self.sink.record(DocEntry::new(method, uri, doc, rendered)).await;
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documenter::ExtractionPolicy;
    use crate::handler::{MemorySink, make_handler};
    use crate::protocol::DocError;
    use bytes::Bytes;
    use futures::stream;
    use http::{Method, StatusCode, header};
    use http_body::Frame;
    use http_body_util::{BodyExt, Full, StreamBody};
    use indoc::indoc;
    use std::convert::Infallible;
    use std::io;

    async fn echo(req: Request<ReplayBody>) -> Result<Response<Full<Bytes>>, Infallible> {
        let body = req.into_body().collect().await.map(|collected| collected.to_bytes()).unwrap_or_default();
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Full::new(body))
            .unwrap())
    }

    fn form_request(body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    #[tokio::test]
    async fn document_exchange_and_pass_body_through() {
        let decorator = DocDecorator::new(RequestDocumenter::builder().build(), MemorySink::new());
        let handler = decorator.decorate(make_handler(echo));

        let resp = handler.call(form_request("name=alice&age=30")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let echoed = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(echoed, Bytes::from_static(b"name=alice&age=30"));

        let entries = decorator.sink().entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].method(), Method::POST);
        assert_eq!(entries[0].uri().path(), "/users");
        assert_eq!(
            entries[0].rendered(),
            indoc! {r#"
            + Request (application/x-www-form-urlencoded)

                + Attributes

                    + name: `alice` (string, optional)
                    + age: `30` (number, optional)

                + Body

                        name=alice&age=30

            + Response 200 (text/plain)

                + Body

                        name=alice&age=30
            "#}
        );
    }

    #[tokio::test]
    async fn extraction_failure_does_not_fail_the_call() {
        let decorator = DocDecorator::new(
            RequestDocumenter::builder().policy(ExtractionPolicy::Strict).build(),
            MemorySink::new(),
        );
        let handler = decorator.decorate(make_handler(echo));

        let resp = handler.call(form_request("a=1&b")).await.unwrap();

        let echoed = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(echoed, Bytes::from_static(b"a=1&b"));
        assert!(decorator.sink().entries().await.is_empty());
    }

    #[tokio::test]
    async fn unreadable_body_fails_the_call() {
        let decorator = DocDecorator::new(RequestDocumenter::builder().build(), MemorySink::new());
        let handler = decorator.decorate(make_handler(echo));

        let chunks: Vec<Result<Frame<Bytes>, io::Error>> = vec![
            Ok(Frame::data(Bytes::from_static(b"a=1"))),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away")),
        ];
        let req = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .body(StreamBody::new(stream::iter(chunks)))
            .unwrap();

        let err = handler.call(req).await.unwrap_err();

        assert!(err.downcast_ref::<DocError>().is_some());
        assert!(decorator.sink().entries().await.is_empty());
    }

    #[tokio::test]
    async fn handler_error_is_returned() {
        let decorator = DocDecorator::new(RequestDocumenter::builder().build(), MemorySink::new());
        let handler = decorator.decorate(make_handler(|_req: Request<ReplayBody>| async {
            Err::<Response<Full<Bytes>>, _>(io::Error::other("handler failed"))
        }));

        let err = handler.call(form_request("a=1")).await.unwrap_err();

        assert_eq!(err.to_string(), "handler failed");
        assert!(decorator.sink().entries().await.is_empty());
    }
}
