//! Non-destructive body duplication.
//!
//! A request body is a single-consumption stream. To document it without
//! stealing it from the handler, the stream is drained once into memory and
//! split into two views:
//!
//! - [`ReplayBody`]: reattached to the live request, yields the original bytes once more
//! - [`Bytes`](bytes::Bytes): the private inspection copy handed to the decoders
//!
//! Both views are byte-identical to what the original stream produced, including
//! the empty body. The whole body is buffered; there is no streaming mode.

mod duplicate;
mod replay;

pub use duplicate::duplicate;
pub use duplicate::duplicate_request;
pub use duplicate::duplicate_response;
pub use replay::ReplayBody;
