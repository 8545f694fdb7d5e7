//! Decoder for `application/x-www-form-urlencoded` bodies.
//!
//! The body is split literally: `&` separates segments, `=` separates key and
//! value. No percent-decoding happens, so `a=%20` documents the value `%20`.
//! Empty segments (an empty body, a trailing `&`, `&&`) are skipped. Every other
//! segment must be exactly one non-empty key and one non-empty value, otherwise
//! the whole decode is rejected.
//!
//! Splitting happens on raw bytes. A value that is not utf8 is kept as bytes
//! and only stringified when it is normalized; a key is converted lossily.

use crate::codec::{RawPair, RawValue};
use crate::protocol::AttributeExtractionError;
use bytes::Bytes;

const PAIR_SEPARATOR: u8 = b'&';
const KEY_VALUE_SEPARATOR: u8 = b'=';

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormDecoder;

impl FormDecoder {
    pub fn decode(&self, body: &[u8]) -> Result<Vec<RawPair>, AttributeExtractionError> {
        body.split(|b| *b == PAIR_SEPARATOR).filter(|segment| !segment.is_empty()).map(parse_segment).collect()
    }
}

fn parse_segment(segment: &[u8]) -> Result<RawPair, AttributeExtractionError> {
    let mut parts = segment.split(|b| *b == KEY_VALUE_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => {
            Ok(RawPair::new(String::from_utf8_lossy(key), raw_value(value)))
        }
        _ => Err(AttributeExtractionError::malformed_form(
            mime::APPLICATION_WWW_FORM_URLENCODED,
            format!("invalid format: {}", String::from_utf8_lossy(segment)),
        )),
    }
}

fn raw_value(value: &[u8]) -> RawValue {
    match std::str::from_utf8(value) {
        Ok(text) => RawValue::Text(text.to_owned()),
        Err(_) => RawValue::Bytes(Bytes::copy_from_slice(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ExtractionErrorKind;

    fn decode(body: &str) -> Result<Vec<RawPair>, AttributeExtractionError> {
        FormDecoder.decode(body.as_bytes())
    }

    #[test]
    fn decode_in_document_order() {
        let pairs = decode("a=1&b=2").unwrap();

        assert_eq!(pairs, vec![RawPair::text("a", "1"), RawPair::text("b", "2")]);
    }

    #[test]
    fn decode_empty_body() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn skip_empty_segments() {
        let pairs = decode("&name=hello&&zip=world&").unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].key(), "name");
        assert_eq!(pairs[1].value(), &RawValue::Text("world".into()));
    }

    #[test]
    fn no_percent_decoding() {
        let pairs = decode("q=a%20b+c").unwrap();

        assert_eq!(pairs, vec![RawPair::text("q", "a%20b+c")]);
    }

    #[test]
    fn reject_segment_without_separator() {
        let err = decode("a=1&b").unwrap_err();

        assert_eq!(err.kind(), ExtractionErrorKind::MalformedForm);
        assert_eq!(err.message(), "invalid format: b");
    }

    #[test]
    fn reject_segment_with_two_separators() {
        let err = decode("a=1=2").unwrap_err();

        assert_eq!(err.kind(), ExtractionErrorKind::MalformedForm);
    }

    #[test]
    fn reject_empty_key_or_value() {
        assert!(decode("=1").is_err());
        assert!(decode("a=").is_err());
    }

    #[test]
    fn non_utf8_value_is_kept_as_bytes() {
        let pairs = FormDecoder.decode(b"a=\xff\xfe&b=2").unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].key(), "a");
        assert_eq!(pairs[0].value(), &RawValue::Bytes(Bytes::from_static(b"\xff\xfe")));
        assert_eq!(pairs[0].value().to_text(), "\u{fffd}\u{fffd}");
        assert_eq!(pairs[1], RawPair::text("b", "2"));
    }

    #[test]
    fn non_utf8_segment_without_separator_is_rejected() {
        let err = FormDecoder.decode(b"a=1&\xff").unwrap_err();

        assert_eq!(err.kind(), ExtractionErrorKind::MalformedForm);
        assert_eq!(err.content_type(), "application/x-www-form-urlencoded");
        assert_eq!(err.message(), "invalid format: \u{fffd}");
    }
}
