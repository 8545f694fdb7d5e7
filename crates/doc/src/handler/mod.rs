//! Middleware that documents the requests flowing into a handler.
//!
//! A [`Handler`] answers one request. [`DocDecorator`] wraps any handler into
//! a [`DocHandler`], which documents every request and response it sees and
//! hands the result to a [`DocSink`]. The wrapped handler receives the request
//! with its body intact.

mod decorator;
mod sink;

pub use decorator::Decorator;
pub use decorator::DocDecorator;
pub use decorator::DocHandler;
pub use sink::DocEntry;
pub use sink::DocSink;
pub use sink::MemorySink;
pub use sink::TracingSink;

use async_trait::async_trait;
use http::{Request, Response};
use http_body::Body;
use std::error::Error;

/// Anything that answers a request.
///
/// [`DocHandler`] needs nothing more than this from the handler it wraps: it
/// calls it once per request, with the body replaced by a [`ReplayBody`] of
/// the same bytes, and buffers whatever response body comes back.
///
/// [`ReplayBody`]: crate::body::ReplayBody
#[async_trait]
pub trait Handler<ReqBody> {
    type RespBody: Body;
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, req: Request<ReqBody>) -> Result<Response<Self::RespBody>, Self::Error>;
}

/// A [`Handler`] backed by an async function, built with [`make_handler`].
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<ReqBody, RespBody, Err, F, Fut> Handler<ReqBody> for HandlerFn<F>
where
    RespBody: Body,
    ReqBody: Send + 'static,
    F: Fn(Request<ReqBody>) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Fut: Future<Output = Result<Response<RespBody>, Err>> + Send,
{
    type RespBody = RespBody;
    type Error = Err;

    async fn call(&self, req: Request<ReqBody>) -> Result<Response<Self::RespBody>, Self::Error> {
        (self.f)(req).await
    }
}

/// Wraps `f` so it can be decorated, typically with [`DocDecorator`].
pub fn make_handler<F, ReqBody, RespBody, Err, Ret>(f: F) -> HandlerFn<F>
where
    RespBody: Body,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<Response<RespBody>, Err>>,
    F: Fn(Request<ReqBody>) -> Ret,
{
    HandlerFn { f }
}
