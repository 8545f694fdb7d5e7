//! The documentation model and its error types.
//!
//! - [`DocRequest`]: one intercepted request, with its header, body, method and attributes
//! - [`DocResponse`]: the response a handler produced, when it was recorded
//! - [`Attribute`]: one normalized request field with its inferred [`ParameterType`]
//! - [`Header`] / [`Body`]: the displayable parts of a message
//! - [`DocError`] / [`AttributeExtractionError`]: everything that can go wrong
//!
//! Models are immutable once built and render themselves through
//! [`Template`](crate::Template).

mod attribute;
pub use attribute::Attribute;
pub use attribute::ParameterType;
pub use attribute::ParameterValue;

mod body;
pub use body::Body;

mod header;
pub use header::Header;
pub use header::HiddenHeaders;

mod request;
pub use request::DocRequest;

mod response;
pub use response::DocResponse;

mod error;
pub use error::AttributeExtractionError;
pub use error::DocError;
pub use error::ExtractionErrorKind;
