//! Document live HTTP requests as API-Blueprint fragments
//!
//! This crate sits in front of a request handler, reads each request body
//! once, hands an identical body to the handler, and turns what it read into
//! a structured documentation model: the request's displayable headers, its
//! body, and one attribute per submitted field. The model renders to an
//! API-Blueprint request section.
//!
//! # Features
//!
//! - `application/x-www-form-urlencoded`, `multipart/form-data` and
//!   `application/json` bodies are decoded into attributes
//! - Attribute types (`string`, `number`, `boolean`) are inferred from values
//! - Field descriptions, required flags and defaults come from a pluggable
//!   [`SchemaLookup`](schema::SchemaLookup)
//! - Malformed bodies are recoverable errors, or silently ignored under
//!   [`ExtractionPolicy::Lenient`]
//! - Responses can be recorded alongside the request
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use http::{Request, header};
//! use http_body_util::Full;
//! use micro_doc::RequestDocumenter;
//! use micro_doc::schema::{Property, StaticSchema};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let documenter = RequestDocumenter::builder()
//!     .schema(StaticSchema::new().with_property("name", Property::new("user name").required(true)))
//!     .build();
//!
//! let req = Request::post("/users")
//!     .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
//!     .body(Full::new(Bytes::from_static(b"name=alice&age=30")))
//!     .unwrap();
//!
//! // `req` carries the original body again, ready for the real handler
//! let (req, doc) = documenter.document(req).await.unwrap();
//!
//! assert_eq!(doc.attributes().len(), 2);
//! assert!(documenter.render(&doc).contains("+ name: `alice` (string, required) - user name"));
//! # drop(req);
//! # }
//! ```
//!
//! To document every request a handler serves, wrap it with
//! [`DocDecorator`](handler::DocDecorator).

pub mod body;
pub mod codec;
pub mod handler;
pub mod protocol;
pub mod schema;

mod documenter;
mod normalizer;
mod render;

pub use documenter::ExtractionPolicy;
pub use documenter::RequestDocumenter;
pub use documenter::RequestDocumenterBuilder;
pub use normalizer::Normalizer;
pub use render::Render;
pub use render::Template;
pub use render::TemplateBuilder;
