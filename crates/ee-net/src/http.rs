//! HTTP request/response contracts.

use crate::url::PageUrl;
use ee_core::EyeError;
use ee_core::EyeResult;

/// Outbound methods the fetch stack supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
        }
    }
}

/// HTTP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    Http10,
    Http11,
}

impl HttpVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http10 => "HTTP/1.0",
            Self::Http11 => "HTTP/1.1",
        }
    }
}

/// Single HTTP header with validated wire-safe name/value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: &str, value: &str) -> EyeResult<Self> {
        if !is_valid_header_name(name) {
            return Err(EyeError::new(
                "fetch.header_name_invalid",
                format!("invalid HTTP header name `{name}`"),
            ));
        }

        if value.bytes().any(|byte| matches!(byte, b'\r' | b'\n' | 0)) {
            return Err(EyeError::new(
                "fetch.header_value_invalid",
                format!("invalid characters found in HTTP header `{name}`"),
            ));
        }

        Ok(Self {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }
}

/// Outgoing request. Always HTTP/1.1 with a connection that closes after
/// the response, so body framing never depends on reuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: PageUrl,
    pub headers: Vec<Header>,
}

impl HttpRequest {
    pub fn get(url: PageUrl) -> EyeResult<Self> {
        let mut headers = Vec::new();
        headers.push(Header::new("Host", &url.authority())?);
        headers.push(Header::new("User-Agent", concat!("ElementEye/", env!("CARGO_PKG_VERSION")))?);
        headers.push(Header::new("Accept", "text/html,application/xhtml+xml,*/*")?);
        headers.push(Header::new("Accept-Encoding", "gzip, deflate, br")?);
        headers.push(Header::new("Connection", "close")?);

        Ok(Self {
            method: HttpMethod::Get,
            url,
            headers,
        })
    }

    pub fn request_target(&self) -> String {
        self.url.path_and_query()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }
}

/// HTTP status code wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HttpStatusCode(u16);

impl HttpStatusCode {
    pub fn new(code: u16) -> EyeResult<Self> {
        if (100..=599).contains(&code) {
            return Ok(Self(code));
        }

        Err(EyeError::new(
            "fetch.status_invalid",
            format!("status code must be 100-599, got `{code}`"),
        ))
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    pub fn is_success(self) -> bool {
        (200..=299).contains(&self.0)
    }

    pub fn is_redirect(self) -> bool {
        matches!(self.0, 301 | 302 | 303 | 307 | 308)
    }
}

/// Incoming response after framing and content decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub version: HttpVersion,
    pub status: HttpStatusCode,
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }
}

fn is_valid_header_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    name.bytes().all(is_token_char)
}

fn is_token_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

#[cfg(test)]
mod tests {
    use super::Header;
    use super::HttpRequest;
    use super::HttpStatusCode;
    use crate::url::PageUrl;

    #[test]
    fn get_request_carries_host_and_close() {
        let url = match PageUrl::parse("https://example.com/path") {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };

        let request = match HttpRequest::get(url) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };

        assert_eq!(request.header("Host"), Some("example.com"));
        assert_eq!(request.header("Connection"), Some("close"));
        assert_eq!(request.request_target(), "/path");
    }

    #[test]
    fn header_rejects_control_characters() {
        assert!(Header::new("X-Test", "a\r\nb").is_err());
        assert!(Header::new("Bad Name", "x").is_err());
    }

    #[test]
    fn status_code_range_is_enforced() {
        assert!(HttpStatusCode::new(200).is_ok());
        assert!(HttpStatusCode::new(99).is_err());
        assert!(HttpStatusCode::new(600).is_err());
    }

    #[test]
    fn redirect_statuses_are_recognized() {
        for code in [301, 302, 303, 307, 308] {
            let status = match HttpStatusCode::new(code) {
                Ok(value) => value,
                Err(error) => panic!("{error}"),
            };
            assert!(status.is_redirect());
        }
        let ok = match HttpStatusCode::new(200) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };
        assert!(!ok.is_redirect());
    }
}
