use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};
use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A body that yields an already buffered payload exactly once.
///
/// This is what gets reattached to the live request after its original stream
/// has been drained for inspection. Downstream consumers read the same bytes
/// they would have read from the original stream. Dropping it releases the
/// buffer and nothing else.
#[derive(Debug, Clone)]
pub struct ReplayBody {
    inner: Option<Bytes>,
}

impl ReplayBody {
    pub fn new(bytes: Bytes) -> Self {
        if bytes.is_empty() { Self::empty() } else { Self { inner: Some(bytes) } }
    }

    pub fn empty() -> Self {
        Self { inner: None }
    }
}

impl From<Bytes> for ReplayBody {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl HttpBody for ReplayBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().inner.take().map(|bytes| Ok(Frame::data(bytes))))
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        match &self.inner {
            None => SizeHint::with_exact(0),
            Some(bytes) => SizeHint::with_exact(bytes.len() as u64),
        }
    }
}
