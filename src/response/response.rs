//! Raw search server response with decode-once caching.

use std::cell::OnceCell;
use std::fmt;

use crate::error::{Result, SolrineError};
use crate::response::normalizer::{DocumentOptions, ResponseNormalizer};
use crate::response::parsed::ParsedData;

/// A response body as returned by the search server.
///
/// The body is decoded the first time [`SolrResponse::parsed_data`] is
/// called. Both outcomes are cached: a successful decode is reused, and a
/// failed decode keeps failing with the same message without parsing again.
pub struct SolrResponse {
    raw: String,
    http_status: Option<u16>,
    http_status_message: Option<String>,
    normalizer: ResponseNormalizer,
    parsed: OnceCell<std::result::Result<ParsedData, String>>,
}

impl SolrResponse {
    /// Wrap a raw body with the default document options.
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self::with_options(raw, DocumentOptions::default())
    }

    /// Wrap a raw body with explicit document options.
    pub fn with_options<S: Into<String>>(raw: S, options: DocumentOptions) -> Self {
        SolrResponse {
            raw: raw.into(),
            http_status: None,
            http_status_message: None,
            normalizer: ResponseNormalizer::new(options),
            parsed: OnceCell::new(),
        }
    }

    /// Attach the HTTP status reported by the transport.
    pub fn with_http_status<S: Into<String>>(mut self, status: u16, message: S) -> Self {
        self.http_status = Some(status);
        self.http_status_message = Some(message.into());
        self
    }

    /// The body exactly as received.
    pub fn raw_response(&self) -> &str {
        &self.raw
    }

    /// HTTP status code, if the transport supplied one.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// HTTP status message, if the transport supplied one.
    pub fn http_status_message(&self) -> Option<&str> {
        self.http_status_message.as_deref()
    }

    /// The document options used for decoding.
    pub fn options(&self) -> &DocumentOptions {
        self.normalizer.options()
    }

    /// Whether a decode has been attempted and succeeded.
    pub fn is_decoded(&self) -> bool {
        matches!(self.parsed.get(), Some(Ok(_)))
    }

    /// Decoded and normalized form of the body.
    pub fn parsed_data(&self) -> Result<&ParsedData> {
        self.parsed
            .get_or_init(|| {
                self.normalizer
                    .decode(&self.raw)
                    .map_err(|e| match e {
                        SolrineError::Decode { message, .. } => message,
                        other => other.to_string(),
                    })
            })
            .as_ref()
            .map_err(|message| SolrineError::decode(message.as_str(), self.raw.as_str()))
    }

    /// Mutable access to the decoded form, decoding first if needed.
    pub fn parsed_data_mut(&mut self) -> Result<&mut ParsedData> {
        self.parsed_data()?;
        match self.parsed.get_mut() {
            Some(Ok(parsed)) => Ok(parsed),
            Some(Err(message)) => Err(SolrineError::decode(message.as_str(), self.raw.as_str())),
            None => Err(SolrineError::other("response was not decoded")),
        }
    }
}

impl fmt::Debug for SolrResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolrResponse")
            .field("raw_len", &self.raw.len())
            .field("http_status", &self.http_status)
            .field("decoded", &self.is_decoded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_cached() {
        let response = SolrResponse::new(r#"{"response": {"numFound": 2, "docs": []}}"#);
        assert!(!response.is_decoded());

        let first = response.parsed_data().unwrap() as *const ParsedData;
        let second = response.parsed_data().unwrap() as *const ParsedData;

        assert!(response.is_decoded());
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_decode_is_permanent() {
        let response = SolrResponse::new("{not json");

        let first = response.parsed_data().unwrap_err();
        let second = response.parsed_data().unwrap_err();

        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(second.raw_response(), Some("{not json"));
        assert!(!response.is_decoded());
    }

    #[test]
    fn test_parsed_data_mut() {
        let mut response = SolrResponse::new(r#"{"response": {"numFound": 2, "docs": []}}"#);
        response.parsed_data_mut().unwrap().response.as_mut().unwrap().num_found = 5;

        assert_eq!(
            response.parsed_data().unwrap().response.as_ref().unwrap().num_found,
            5
        );
    }

    #[test]
    fn test_http_status() {
        let response = SolrResponse::new("{}").with_http_status(200, "OK");
        assert_eq!(response.http_status(), Some(200));
        assert_eq!(response.http_status_message(), Some("OK"));
    }
}
