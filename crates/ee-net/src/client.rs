//! Blocking HTTP/1.1 fetch client.
//!
//! One connection per request, closed after the response. Body framing
//! supports Content-Length, chunked transfer encoding, and read-to-EOF for
//! connection-close responses. Compressed bodies are decoded transparently.

use crate::http::Header;
use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::HttpStatusCode;
use crate::http::HttpVersion;
use crate::tls::connect_tls;
use crate::url::PageUrl;
use brotli::Decompressor;
use ee_core::EyeError;
use ee_core::EyeResult;
use flate2::read::DeflateDecoder;
use flate2::read::GzDecoder;
use flate2::read::ZlibDecoder;
use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::net::TcpStream;
use std::net::ToSocketAddrs;
use std::time::Duration;
use tracing::debug;

const MAX_RESPONSE_HEAD_BYTES: usize = 128 * 1024;
const MAX_CHUNK_LINE_BYTES: usize = 8 * 1024;
const MAX_REDIRECTS: usize = 10;

/// Stream type shared by plain TCP and TLS connections.
pub trait IoStream: Read + Write {}
impl<T> IoStream for T where T: Read + Write {}

pub type BoxedIoStream = Box<dyn IoStream>;

/// A completed page fetch after any redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub final_url: String,
    pub status: u16,
    pub http_version: String,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Decodes the body to text using the detected character set.
    pub fn text(&self) -> String {
        crate::charset::decode_text(&self.body, &self.content_type)
    }

    pub fn is_html(&self) -> bool {
        let lower = self.content_type.to_ascii_lowercase();
        lower.contains("text/html") || lower.contains("application/xhtml+xml")
    }
}

/// Blocking GET client with a per-connection timeout.
#[derive(Debug, Clone)]
pub struct FetchClient {
    timeout: Duration,
}

impl FetchClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Fetches `input`, following up to ten redirects.
    pub fn fetch(&self, input: &str) -> EyeResult<FetchedPage> {
        let mut url = PageUrl::parse(input)?;
        let mut redirects = 0_usize;

        loop {
            let request = HttpRequest::get(url.clone())?;
            let response = self.execute(&request)?;
            debug!(url = url.as_str(), status = response.status.as_u16(), "fetched");

            if response.status.is_redirect() {
                let location = response.header("location").map(str::to_owned);
                if let Some(location) = location {
                    if redirects >= MAX_REDIRECTS {
                        return Err(EyeError::new(
                            "fetch.too_many_redirects",
                            format!("more than {MAX_REDIRECTS} redirects while loading {input}"),
                        ));
                    }
                    url = url.join(&location)?;
                    redirects += 1;
                    continue;
                }
            }

            if !response.status.is_success() {
                return Err(EyeError::new(
                    "fetch.http_status",
                    format!(
                        "server returned HTTP {} for {}",
                        response.status.as_u16(),
                        url.as_str()
                    ),
                ));
            }

            let content_type = response
                .header("content-type")
                .unwrap_or("unknown")
                .to_owned();
            let headers = response
                .headers
                .iter()
                .map(|header| (header.name.clone(), header.value.clone()))
                .collect();

            return Ok(FetchedPage {
                final_url: url.as_str().to_owned(),
                status: response.status.as_u16(),
                http_version: response.version.as_str().to_owned(),
                content_type,
                headers,
                body: response.body,
            });
        }
    }

    fn execute(&self, request: &HttpRequest) -> EyeResult<HttpResponse> {
        let mut stream = self.connect(&request.url)?;
        write_request(&mut *stream, request)?;
        read_response(&mut *stream)
    }

    fn connect(&self, url: &PageUrl) -> EyeResult<BoxedIoStream> {
        let query = format!("{}:{}", url.host(), url.port());
        let addresses: Vec<_> = query
            .to_socket_addrs()
            .map_err(|error| {
                EyeError::new(
                    "fetch.dns_failed",
                    format!("failed to resolve `{query}`: {error}"),
                )
            })?
            .collect();

        let mut last_error: Option<EyeError> = None;
        for address in addresses {
            match TcpStream::connect_timeout(&address, self.timeout) {
                Ok(stream) => {
                    configure_stream(&stream, self.timeout)?;
                    return if url.is_secure() {
                        connect_tls(stream, url.host())
                    } else {
                        Ok(Box::new(stream))
                    };
                }
                Err(error) => {
                    last_error = Some(EyeError::new(
                        "fetch.connect_failed",
                        format!("failed to connect to `{address}`: {error}"),
                    ));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EyeError::new(
                "fetch.dns_no_results",
                format!("resolver returned no addresses for `{query}`"),
            )
        }))
    }
}

fn configure_stream(stream: &TcpStream, timeout: Duration) -> EyeResult<()> {
    stream.set_nodelay(true).map_err(|error| {
        EyeError::new("fetch.socket_config", format!("TCP_NODELAY failed: {error}"))
    })?;
    stream.set_read_timeout(Some(timeout)).map_err(|error| {
        EyeError::new("fetch.socket_config", format!("read timeout failed: {error}"))
    })?;
    stream.set_write_timeout(Some(timeout)).map_err(|error| {
        EyeError::new(
            "fetch.socket_config",
            format!("write timeout failed: {error}"),
        )
    })
}

fn write_request(stream: &mut dyn Write, request: &HttpRequest) -> EyeResult<()> {
    let mut encoded = Vec::new();
    encoded.extend_from_slice(request.method.as_str().as_bytes());
    encoded.push(b' ');
    encoded.extend_from_slice(request.request_target().as_bytes());
    encoded.extend_from_slice(b" HTTP/1.1\r\n");

    for header in &request.headers {
        encoded.extend_from_slice(header.name.as_bytes());
        encoded.extend_from_slice(b": ");
        encoded.extend_from_slice(header.value.as_bytes());
        encoded.extend_from_slice(b"\r\n");
    }
    encoded.extend_from_slice(b"\r\n");

    stream.write_all(&encoded).map_err(|error| {
        EyeError::new(
            "fetch.write_failed",
            format!("failed to write HTTP request bytes: {error}"),
        )
    })?;
    stream.flush().map_err(|error| {
        EyeError::new(
            "fetch.flush_failed",
            format!("failed to flush HTTP request bytes: {error}"),
        )
    })
}

fn read_response(stream: &mut dyn Read) -> EyeResult<HttpResponse> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    let mut header_end: Option<usize> = None;

    while header_end.is_none() {
        let read = stream.read(&mut chunk).map_err(|error| {
            EyeError::new(
                "fetch.read_head_failed",
                format!("failed while reading HTTP response head: {error}"),
            )
        })?;

        if read == 0 {
            return Err(EyeError::new(
                "fetch.unexpected_eof",
                "unexpected EOF before response head completed",
            ));
        }

        buffer.extend_from_slice(&chunk[..read]);
        if buffer.len() > MAX_RESPONSE_HEAD_BYTES {
            return Err(EyeError::new(
                "fetch.head_too_large",
                format!("HTTP response head exceeds {MAX_RESPONSE_HEAD_BYTES} bytes"),
            ));
        }

        header_end = find_header_end(&buffer);
    }

    let header_end = header_end.ok_or_else(|| {
        EyeError::new(
            "fetch.head_terminator_missing",
            "response head terminator not found",
        )
    })?;

    let head_text = std::str::from_utf8(&buffer[..header_end]).map_err(|error| {
        EyeError::new(
            "fetch.head_invalid_utf8",
            format!("HTTP response head is not valid UTF-8 text: {error}"),
        )
    })?;
    let mut body_bytes = buffer[header_end..].to_vec();

    let mut lines = head_text.split("\r\n");
    let status_line = lines
        .next()
        .ok_or_else(|| EyeError::new("fetch.status_line_missing", "missing HTTP status line"))?;
    let (version, status) = parse_status_line(status_line)?;

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line.split_once(':').ok_or_else(|| {
            EyeError::new(
                "fetch.header_invalid",
                format!("invalid HTTP header line `{line}`"),
            )
        })?;
        headers.push(Header::new(name.trim(), value.trim())?);
    }

    let has_transfer_encoding = headers
        .iter()
        .any(|header| header.name.eq_ignore_ascii_case("transfer-encoding"));
    let chunked = header_contains(&headers, "transfer-encoding", "chunked");
    if has_transfer_encoding && !chunked {
        return Err(EyeError::new(
            "fetch.transfer_encoding_unsupported",
            "only chunked transfer encoding is supported",
        ));
    }

    let content_length = if chunked {
        None
    } else {
        parse_content_length(&headers)?
    };
    let bodyless = status_disallows_body(status.as_u16());

    if !bodyless {
        if chunked {
            body_bytes = read_chunked_body(stream, body_bytes)?;
        } else if let Some(len) = content_length {
            if body_bytes.len() < len {
                let mut rest = vec![0_u8; len - body_bytes.len()];
                stream.read_exact(&mut rest).map_err(|error| {
                    EyeError::new(
                        "fetch.read_body_failed",
                        format!("failed to read HTTP body bytes: {error}"),
                    )
                })?;
                body_bytes.extend_from_slice(&rest);
            } else {
                body_bytes.truncate(len);
            }
        } else {
            // No framing headers: the server signals the end by closing.
            let mut tail = Vec::new();
            stream.read_to_end(&mut tail).map_err(|error| {
                EyeError::new(
                    "fetch.read_body_failed",
                    format!("failed while draining response body: {error}"),
                )
            })?;
            body_bytes.extend_from_slice(&tail);
        }

        body_bytes = decode_content_encoding(&headers, &body_bytes)?;
    }

    Ok(HttpResponse {
        version,
        status,
        headers,
        body: if bodyless { Vec::new() } else { body_bytes },
    })
}

struct PrefixedStreamReader<'a> {
    prefetched: Vec<u8>,
    offset: usize,
    stream: &'a mut dyn Read,
}

impl<'a> PrefixedStreamReader<'a> {
    fn new(stream: &'a mut dyn Read, prefetched: Vec<u8>) -> Self {
        Self {
            prefetched,
            offset: 0,
            stream,
        }
    }

    fn read_exact_into(&mut self, out: &mut [u8], detail: &str) -> EyeResult<()> {
        let available = self.prefetched.len().saturating_sub(self.offset);
        let prefix_take = available.min(out.len());

        if prefix_take > 0 {
            out[..prefix_take]
                .copy_from_slice(&self.prefetched[self.offset..self.offset + prefix_take]);
            self.offset += prefix_take;
        }

        if prefix_take < out.len() {
            self.stream
                .read_exact(&mut out[prefix_take..])
                .map_err(|error| {
                    EyeError::new("fetch.read_body_failed", format!("{detail}: {error}"))
                })?;
        }

        Ok(())
    }
}

fn read_chunked_body(stream: &mut dyn Read, prefetched: Vec<u8>) -> EyeResult<Vec<u8>> {
    let mut reader = PrefixedStreamReader::new(stream, prefetched);
    let mut decoded = Vec::new();

    loop {
        let size_line = read_crlf_line(&mut reader)?;
        if size_line.is_empty() {
            continue;
        }

        let size_token = size_line.split(';').next().unwrap_or_default().trim();
        let chunk_size = usize::from_str_radix(size_token, 16).map_err(|error| {
            EyeError::new(
                "fetch.chunk_size_invalid",
                format!("invalid chunk size `{size_token}`: {error}"),
            )
        })?;

        if chunk_size == 0 {
            drain_chunk_trailers(&mut reader)?;
            break;
        }

        let start = decoded.len();
        decoded.resize(start + chunk_size, 0);
        reader.read_exact_into(&mut decoded[start..], "failed while reading chunked body")?;

        let mut terminator = [0_u8; 2];
        reader.read_exact_into(&mut terminator, "failed while reading chunk terminator")?;
        if terminator != *b"\r\n" {
            return Err(EyeError::new(
                "fetch.chunk_terminator_invalid",
                "chunk data is missing trailing CRLF",
            ));
        }
    }

    Ok(decoded)
}

fn drain_chunk_trailers(reader: &mut PrefixedStreamReader<'_>) -> EyeResult<()> {
    loop {
        let line = read_crlf_line(reader)?;
        if line.is_empty() {
            break;
        }

        if line.split_once(':').is_none() {
            return Err(EyeError::new(
                "fetch.chunk_trailer_invalid",
                format!("invalid chunk trailer line `{line}`"),
            ));
        }
    }

    Ok(())
}

fn read_crlf_line(reader: &mut PrefixedStreamReader<'_>) -> EyeResult<String> {
    let mut line = Vec::new();

    loop {
        let mut byte = [0_u8; 1];
        reader.read_exact_into(&mut byte, "failed while reading chunked transfer line")?;
        line.push(byte[0]);

        if line.len() > MAX_CHUNK_LINE_BYTES {
            return Err(EyeError::new(
                "fetch.chunk_line_too_large",
                format!("chunk metadata line exceeds {MAX_CHUNK_LINE_BYTES} bytes"),
            ));
        }

        if line.len() >= 2 && line[line.len() - 2..] == *b"\r\n" {
            line.truncate(line.len() - 2);
            return String::from_utf8(line).map_err(|error| {
                EyeError::new(
                    "fetch.chunk_line_invalid_utf8",
                    format!("chunk metadata line is not valid UTF-8: {error}"),
                )
            });
        }
    }
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|idx| idx + 4)
}

fn parse_status_line(line: &str) -> EyeResult<(HttpVersion, HttpStatusCode)> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().ok_or_else(|| {
        EyeError::new(
            "fetch.status_line_invalid",
            format!("missing HTTP version in status line `{line}`"),
        )
    })?;
    let code_text = parts.next().ok_or_else(|| {
        EyeError::new(
            "fetch.status_line_invalid",
            format!("missing status code in status line `{line}`"),
        )
    })?;

    let version = match version {
        "HTTP/1.0" => HttpVersion::Http10,
        "HTTP/1.1" => HttpVersion::Http11,
        other => {
            return Err(EyeError::new(
                "fetch.version_unsupported",
                format!("unsupported response version `{other}`"),
            ));
        }
    };

    let code_value = code_text.parse::<u16>().map_err(|error| {
        EyeError::new(
            "fetch.status_line_invalid",
            format!("invalid status code `{code_text}`: {error}"),
        )
    })?;

    Ok((version, HttpStatusCode::new(code_value)?))
}

fn parse_content_length(headers: &[Header]) -> EyeResult<Option<usize>> {
    let mut value: Option<usize> = None;
    for header in headers {
        if !header.name.eq_ignore_ascii_case("content-length") {
            continue;
        }

        let parsed = header.value.trim().parse::<usize>().map_err(|error| {
            EyeError::new(
                "fetch.content_length_invalid",
                format!("invalid Content-Length `{}`: {error}", header.value),
            )
        })?;

        if let Some(existing) = value {
            if existing != parsed {
                return Err(EyeError::new(
                    "fetch.content_length_conflict",
                    "conflicting Content-Length headers in response",
                ));
            }
        } else {
            value = Some(parsed);
        }
    }

    Ok(value)
}

fn status_disallows_body(status_code: u16) -> bool {
    (100..200).contains(&status_code) || status_code == 204 || status_code == 304
}

fn header_contains(headers: &[Header], name: &str, value: &str) -> bool {
    headers.iter().any(|header| {
        header.name.eq_ignore_ascii_case(name)
            && header
                .value
                .split(',')
                .any(|token| token.trim().eq_ignore_ascii_case(value))
    })
}

fn decode_content_encoding(headers: &[Header], body: &[u8]) -> EyeResult<Vec<u8>> {
    let encodings = content_encodings(headers);
    if encodings.is_empty() {
        return Ok(body.to_vec());
    }

    let mut decoded = body.to_vec();
    for encoding in encodings.iter().rev() {
        decoded = match encoding.as_str() {
            "identity" => decoded,
            "gzip" | "x-gzip" => decode_gzip(&decoded)?,
            "deflate" => decode_deflate(&decoded)?,
            "br" => decode_brotli(&decoded)?,
            _ => {
                return Err(EyeError::new(
                    "fetch.content_encoding_unsupported",
                    format!("unsupported content encoding `{encoding}`"),
                ));
            }
        };
    }

    Ok(decoded)
}

fn content_encodings(headers: &[Header]) -> Vec<String> {
    let mut encodings = Vec::new();
    for header in headers {
        if !header.name.eq_ignore_ascii_case("content-encoding") {
            continue;
        }

        for token in header.value.split(',') {
            let value = token.trim().to_ascii_lowercase();
            if !value.is_empty() {
                encodings.push(value);
            }
        }
    }

    encodings
}

fn decode_gzip(body: &[u8]) -> EyeResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(Cursor::new(body));
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded).map_err(|error| {
        EyeError::new("fetch.decode_failed", format!("gzip decode failed: {error}"))
    })?;
    Ok(decoded)
}

fn decode_deflate(body: &[u8]) -> EyeResult<Vec<u8>> {
    let mut zlib_decoder = ZlibDecoder::new(Cursor::new(body));
    let mut zlib_decoded = Vec::new();
    if zlib_decoder.read_to_end(&mut zlib_decoded).is_ok() {
        return Ok(zlib_decoded);
    }

    // Some servers send raw deflate without the zlib wrapper.
    let mut raw_decoder = DeflateDecoder::new(Cursor::new(body));
    let mut raw_decoded = Vec::new();
    raw_decoder.read_to_end(&mut raw_decoded).map_err(|error| {
        EyeError::new(
            "fetch.decode_failed",
            format!("deflate decode failed: {error}"),
        )
    })?;
    Ok(raw_decoded)
}

fn decode_brotli(body: &[u8]) -> EyeResult<Vec<u8>> {
    let mut decoder = Decompressor::new(Cursor::new(body), 4096);
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded).map_err(|error| {
        EyeError::new(
            "fetch.decode_failed",
            format!("brotli decode failed: {error}"),
        )
    })?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::FetchClient;
    use super::decode_content_encoding;
    use super::find_header_end;
    use super::parse_status_line;
    use super::read_chunked_body;
    use super::read_response;
    use super::status_disallows_body;
    use crate::http::Header;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use flate2::write::ZlibEncoder;
    use std::io::Cursor;
    use std::io::Read;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Serves one canned HTTP response on a loopback port.
    fn serve_once(response: &'static [u8]) -> u16 {
        let listener = match TcpListener::bind("127.0.0.1:0") {
            Ok(listener) => listener,
            Err(error) => panic!("{error}"),
        };
        let port = match listener.local_addr() {
            Ok(addr) => addr.port(),
            Err(error) => panic!("{error}"),
        };

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0_u8; 4096];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response);
            }
        });

        port
    }

    #[test]
    fn non_success_status_is_a_fetch_error() {
        let port = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 22\r\nConnection: close\r\n\r\n\
              <html>not found</html>",
        );
        let client = FetchClient::new(Duration::from_secs(5));
        let outcome = client.fetch(&format!("http://127.0.0.1:{port}/missing"));
        assert!(outcome.is_err());
        if let Err(error) = outcome {
            assert_eq!(error.code, "fetch.http_status");
        }
    }

    #[test]
    fn success_status_yields_a_page() {
        let port = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 16\r\n\
              Connection: close\r\n\r\n<html>ok</html>\n",
        );
        let client = FetchClient::new(Duration::from_secs(5));
        let page = match client.fetch(&format!("http://127.0.0.1:{port}/")) {
            Ok(page) => page,
            Err(error) => panic!("{error}"),
        };
        assert_eq!(page.status, 200);
        assert!(page.is_html());
    }

    #[test]
    fn header_terminator_is_detected() {
        let data = b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n";
        assert_eq!(find_header_end(data), Some(data.len()));
    }

    #[test]
    fn status_line_parser_handles_both_versions() {
        assert!(parse_status_line("HTTP/1.1 200 OK").is_ok());
        assert!(parse_status_line("HTTP/1.0 200 OK").is_ok());
        assert!(parse_status_line("HTTP/2 200").is_err());
    }

    #[test]
    fn detects_bodyless_status_codes() {
        assert!(status_disallows_body(101));
        assert!(status_disallows_body(204));
        assert!(status_disallows_body(304));
        assert!(!status_disallows_body(200));
    }

    #[test]
    fn reads_content_length_body() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello";
        let mut stream = Cursor::new(raw.to_vec());
        let response = match read_response(&mut stream) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };
        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.body, b"hello");
    }

    #[test]
    fn reads_connection_close_body_to_eof() {
        let raw = b"HTTP/1.0 200 OK\r\nConnection: close\r\n\r\nstreamed body";
        let mut stream = Cursor::new(raw.to_vec());
        let response = match read_response(&mut stream) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };
        assert_eq!(response.body, b"streamed body");
    }

    #[test]
    fn decodes_chunked_body() {
        let prefetched = b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n".to_vec();
        let mut stream = Cursor::new(Vec::<u8>::new());
        let decoded = read_chunked_body(&mut stream, prefetched);
        assert_eq!(decoded, Ok(b"Wikipedia".to_vec()));
    }

    #[test]
    fn chunked_decode_reports_invalid_size() {
        let prefetched = b"Z\r\nx\r\n0\r\n\r\n".to_vec();
        let mut stream = Cursor::new(Vec::<u8>::new());
        let decoded = read_chunked_body(&mut stream, prefetched);
        assert!(decoded.is_err());
        if let Err(error) = decoded {
            assert_eq!(error.code, "fetch.chunk_size_invalid");
        }
    }

    #[test]
    fn read_response_handles_chunked_transfer_encoding() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n\
                    4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";
        let mut stream = Cursor::new(raw.to_vec());
        let response = match read_response(&mut stream) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };
        assert_eq!(response.body, b"Wikipedia");
    }

    #[test]
    fn rejects_unsupported_transfer_encoding() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: gzip\r\n\r\nbody";
        let mut stream = Cursor::new(raw.to_vec());
        let outcome = read_response(&mut stream);
        assert!(outcome.is_err());
        if let Err(error) = outcome {
            assert_eq!(error.code, "fetch.transfer_encoding_unsupported");
        }
    }

    #[test]
    fn decodes_gzip_content_encoding() {
        let mut encoded = Vec::new();
        {
            let mut encoder = GzEncoder::new(&mut encoded, Compression::default());
            if let Err(error) = encoder.write_all(b"hello gzip") {
                panic!("{error}");
            }
            if let Err(error) = encoder.finish() {
                panic!("{error}");
            }
        }

        let header = match Header::new("Content-Encoding", "gzip") {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };
        let decoded = decode_content_encoding(&[header], &encoded);
        assert_eq!(decoded, Ok(b"hello gzip".to_vec()));
    }

    #[test]
    fn decodes_deflate_content_encoding() {
        let mut encoded = Vec::new();
        {
            let mut encoder = ZlibEncoder::new(&mut encoded, Compression::default());
            if let Err(error) = encoder.write_all(b"hello deflate") {
                panic!("{error}");
            }
            if let Err(error) = encoder.finish() {
                panic!("{error}");
            }
        }

        let header = match Header::new("Content-Encoding", "deflate") {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        };
        let decoded = decode_content_encoding(&[header], &encoded);
        assert_eq!(decoded, Ok(b"hello deflate".to_vec()));
    }
}
