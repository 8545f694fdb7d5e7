use crate::body::ReplayBody;
use crate::protocol::DocError;
use bytes::Bytes;
use http::{Request, Response};
use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use std::error::Error;
use tracing::{error, trace};

/// Drains `body` and returns two equal views of it: a [`ReplayBody`] for the
/// live pipeline and the buffered bytes for inspection.
///
/// Trailers are not preserved. A failing stream is reported as [`DocError::Io`];
/// in that case the partially read data is gone and nothing can be replayed.
pub async fn duplicate<B>(body: B) -> Result<(ReplayBody, Bytes), DocError>
where
    B: HttpBody,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            let e = DocError::io(e);
            error!(cause = %e, "failed to drain body for duplication");
            return Err(e);
        }
    };

    trace!(size = bytes.len(), "duplicated body");
    Ok((ReplayBody::new(bytes.clone()), bytes))
}

/// Duplicates the body of `req`, leaving method, uri, headers and extensions untouched.
pub async fn duplicate_request<B>(req: Request<B>) -> Result<(Request<ReplayBody>, Bytes), DocError>
where
    B: HttpBody,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();
    let (replay, bytes) = duplicate(body).await?;
    Ok((Request::from_parts(parts, replay), bytes))
}

/// Duplicates the body of `resp`, leaving status and headers untouched.
pub async fn duplicate_response<B>(resp: Response<B>) -> Result<(Response<ReplayBody>, Bytes), DocError>
where
    B: HttpBody,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let (parts, body) = resp.into_parts();
    let (replay, bytes) = duplicate(body).await?;
    Ok((Response::from_parts(parts, replay), bytes))
}
