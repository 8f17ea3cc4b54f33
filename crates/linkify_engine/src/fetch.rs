use async_trait::async_trait;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use linkify_logging::link_debug;

use crate::IngestError;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the decoded HTML body.
    async fn fetch(&self, url: &str) -> Result<String, IngestError>;
}

/// Single-shot GET over a default `reqwest` client: no custom headers,
/// platform-default redirect policy and timeouts, full body buffered.
/// Only an exact 200 with a cleanly decodable body counts as success.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, IngestError> {
        let parsed =
            url::Url::parse(url).map_err(|err| IngestError::InvalidUrl(err.to_string()))?;
        if !parsed.has_host() {
            return Err(IngestError::InvalidUrl(format!("no host in {url}")));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|err| IngestError::FetchFailed(err.to_string()))?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(IngestError::FetchFailed(format!("http status {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|err| IngestError::FetchFailed(err.to_string()))?;
        link_debug!("fetched {} bytes from {url}", bytes.len());

        decode_page(&bytes, content_type.as_deref()).map_err(IngestError::FetchFailed)
    }
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset ->
/// chardetng fallback. A body that cannot be decoded cleanly is a fetch
/// failure, not a parse failure.
fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<String, String> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(charset_of) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_of(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let part = part.trim();
            if part.len() < "charset=".len() {
                return None;
            }
            let (key, value) = part.split_at("charset=".len());
            if key.eq_ignore_ascii_case("charset=") {
                Some(value.trim_matches([' ', '"', '\''].as_ref()))
            } else {
                None
            }
        })
        .next()
        .map(|value| value.to_string())
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(format!("body is not valid {}", encoding.name()));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{charset_of, decode_page};

    #[test]
    fn charset_is_parsed_case_insensitively() {
        assert_eq!(
            charset_of("text/html; CHARSET=\"utf-8\"").as_deref(),
            Some("utf-8")
        );
        assert_eq!(charset_of("text/html"), None);
    }

    #[test]
    fn latin1_body_decodes_via_header_charset() {
        let decoded = decode_page(b"caf\xe9", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(decoded, "caf\u{e9}");
    }

    #[test]
    fn utf8_bom_wins_over_header() {
        let decoded = decode_page(b"\xEF\xBB\xBFhello", Some("text/html; charset=ISO-8859-1"));
        assert_eq!(decoded.unwrap(), "hello");
    }

    #[test]
    fn undecodable_body_is_an_error() {
        assert!(decode_page(b"abc\xff", Some("text/html; charset=utf-8")).is_err());
    }
}
