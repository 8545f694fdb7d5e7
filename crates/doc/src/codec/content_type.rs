//! Content-Type parsing and decoder routing.
//!
//! The header value is parsed into a media type and its parameters, then the
//! media type selects exactly one decoder:
//!
//! | media type                          | decoder              |
//! |-------------------------------------|----------------------|
//! | `application/x-www-form-urlencoded` | [`FormDecoder`]      |
//! | `multipart/form-data`               | [`MultipartDecoder`] |
//! | `application/json`                  | [`JsonDecoder`]      |
//!
//! Any other media type, or a missing header, routes to no decoder at all.

use crate::codec::{FormDecoder, JsonDecoder, MultipartDecoder, RawPair};
use crate::protocol::AttributeExtractionError;
use bytes::Bytes;
use mime::Mime;
use tracing::debug;

const BOUNDARY: &str = "boundary";

/// A parsed `Content-Type`: the lower-cased `type/subtype[+suffix]` essence plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    pub fn parse(content_type: &str) -> Result<Self, AttributeExtractionError> {
        let mime = content_type
            .trim()
            .parse::<Mime>()
            .map_err(|e| AttributeExtractionError::invalid_content_type(content_type, e))?;

        let essence = mime.essence_str().to_ascii_lowercase();
        let params =
            mime.params().map(|(name, value)| (name.as_str().to_ascii_lowercase(), value.as_str().to_owned())).collect();

        Ok(Self { essence, params })
    }

    pub fn essence(&self) -> &str {
        &self.essence
    }

    /// Looks a parameter up by its case-insensitive name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }
}

/// The decoder selected for one request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDecoder {
    Form(FormDecoder),
    Multipart(MultipartDecoder),
    Json(JsonDecoder),
}

impl AttributeDecoder {
    /// Selects the decoder for `content_type`.
    ///
    /// Returns `Ok(None)` for an empty header or an unrecognized media type, and
    /// an error when the header cannot be parsed or a multipart boundary is missing.
    pub fn route(content_type: &str) -> Result<Option<Self>, AttributeExtractionError> {
        if content_type.trim().is_empty() {
            return Ok(None);
        }

        let media_type = MediaType::parse(content_type)?;
        let decoder = match media_type.essence() {
            essence if essence == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() => Some(Self::Form(FormDecoder)),
            essence if essence == mime::MULTIPART_FORM_DATA.essence_str() => {
                let boundary = media_type
                    .param(BOUNDARY)
                    .filter(|boundary| !boundary.is_empty())
                    .ok_or_else(|| AttributeExtractionError::missing_boundary(content_type))?;
                Some(Self::Multipart(MultipartDecoder::new(boundary)))
            }
            essence if essence == mime::APPLICATION_JSON.essence_str() => Some(Self::Json(JsonDecoder)),
            _ => None,
        };

        debug!(media_type = media_type.essence(), decoder = decoder.as_ref().map(Self::name), "routed content type");
        Ok(decoder)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Form(_) => "form",
            Self::Multipart(_) => "multipart",
            Self::Json(_) => "json",
        }
    }

    /// Runs the selected decoder, and only that one, over `body`.
    pub async fn decode(&self, body: &Bytes) -> Result<Vec<RawPair>, AttributeExtractionError> {
        match self {
            Self::Form(decoder) => decoder.decode(body),
            Self::Multipart(decoder) => decoder.decode(body.clone()).await,
            Self::Json(decoder) => Ok(decoder.decode(body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ExtractionErrorKind;

    #[test]
    fn parse_media_type_with_params() {
        let media_type = MediaType::parse("Multipart/Form-Data; Boundary=abc123").unwrap();

        assert_eq!(media_type.essence(), "multipart/form-data");
        assert_eq!(media_type.param("boundary"), Some("abc123"));
        assert_eq!(media_type.param("BOUNDARY"), Some("abc123"));
        assert_eq!(media_type.param("charset"), None);
    }

    #[test]
    fn parse_keeps_structured_suffix() {
        let media_type = MediaType::parse("Application/Vnd.Api+JSON; charset=utf-8").unwrap();

        assert_eq!(media_type.essence(), "application/vnd.api+json");
    }

    #[test]
    fn parse_invalid_media_type() {
        let err = MediaType::parse("not a media type").unwrap_err();

        assert_eq!(err.kind(), ExtractionErrorKind::InvalidContentType);
        assert_eq!(err.content_type(), "not a media type");
    }

    #[test]
    fn route_form() {
        let decoder = AttributeDecoder::route("application/x-www-form-urlencoded").unwrap();

        assert_eq!(decoder, Some(AttributeDecoder::Form(FormDecoder)));
    }

    #[test]
    fn route_json_with_charset() {
        let decoder = AttributeDecoder::route("application/json; charset=utf-8").unwrap();

        assert_eq!(decoder, Some(AttributeDecoder::Json(JsonDecoder)));
    }

    #[test]
    fn route_multipart_with_boundary() {
        let decoder = AttributeDecoder::route("multipart/form-data; boundary=----WebKitFormBoundary").unwrap();

        assert_eq!(decoder, Some(AttributeDecoder::Multipart(MultipartDecoder::new("----WebKitFormBoundary"))));
    }

    #[test]
    fn route_multipart_without_boundary() {
        let err = AttributeDecoder::route("multipart/form-data").unwrap_err();

        assert_eq!(err.kind(), ExtractionErrorKind::MissingBoundary);
    }

    #[test]
    fn route_unrecognized_or_empty() {
        assert_eq!(AttributeDecoder::route("text/plain").unwrap(), None);
        assert_eq!(AttributeDecoder::route("application/xml").unwrap(), None);
        assert_eq!(AttributeDecoder::route("").unwrap(), None);
        assert_eq!(AttributeDecoder::route("   ").unwrap(), None);
    }

    #[test]
    fn route_requires_exact_media_type() {
        assert_eq!(AttributeDecoder::route("application/json+foo").unwrap(), None);
        assert_eq!(AttributeDecoder::route("application/vnd.api+json").unwrap(), None);
        assert_eq!(AttributeDecoder::route("application/problem+json").unwrap(), None);
        assert_eq!(AttributeDecoder::route("multipart/form-data+x; boundary=b").unwrap(), None);
    }

    #[tokio::test]
    async fn decode_runs_routed_decoder_only() {
        // a form body sent as json is not valid json, so only the json decoder's leniency shows
        let body = Bytes::from_static(b"a=1&b=2");

        let as_json = AttributeDecoder::Json(JsonDecoder).decode(&body).await.unwrap();
        let as_form = AttributeDecoder::Form(FormDecoder).decode(&body).await.unwrap();

        assert!(as_json.is_empty());
        assert_eq!(as_form.len(), 2);
    }
}
