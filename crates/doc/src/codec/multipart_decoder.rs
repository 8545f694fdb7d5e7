//! Decoder for `multipart/form-data` bodies, backed by [`multer`].
//!
//! Parts are read in submission order. Each part becomes one pair keyed by its
//! form-field name, with the whole part payload buffered as the value. A part
//! without a name is keyed by the empty string.

use crate::codec::RawPair;
use crate::protocol::AttributeExtractionError;
use bytes::Bytes;
use std::io;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartDecoder {
    boundary: String,
}

impl MultipartDecoder {
    pub fn new<S: Into<String>>(boundary: S) -> Self {
        Self { boundary: boundary.into() }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub async fn decode(&self, body: Bytes) -> Result<Vec<RawPair>, AttributeExtractionError> {
        if body.is_empty() {
            return Ok(vec![]);
        }

        let stream = futures::stream::once(async move { Ok::<_, io::Error>(body) });
        let mut multipart = multer::Multipart::new(stream, self.boundary.clone());

        let mut pairs = vec![];
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Err(self.error(e)),
            };

            let key = field.name().unwrap_or_default().to_owned();
            let value = field.bytes().await.map_err(|e| self.error(e))?;
            trace!(key = %key, size = value.len(), "read multipart field");

            pairs.push(RawPair::bytes(key, value));
        }

        Ok(pairs)
    }

    fn error(&self, e: multer::Error) -> AttributeExtractionError {
        AttributeExtractionError::multipart(format!("{}; boundary={}", mime::MULTIPART_FORM_DATA, self.boundary), e)
    }
}
