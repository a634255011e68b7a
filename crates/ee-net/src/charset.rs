//! Character set detection and body decoding.
//!
//! For HTML responses a `<meta charset>` declaration in the first 8 KiB
//! wins over the Content-Type header. Unknown or missing charsets fall
//! back to lossy UTF-8.

use encoding_rs::Encoding;

pub fn decode_text(body: &[u8], content_type: &str) -> String {
    if let Some(label) = detect_charset(body, content_type) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
    }

    String::from_utf8_lossy(body).to_string()
}

fn detect_charset(body: &[u8], content_type: &str) -> Option<String> {
    let lower = content_type.to_ascii_lowercase();
    let is_html = lower.contains("text/html") || lower.contains("application/xhtml+xml");

    if is_html {
        if let Some(meta_charset) = charset_from_html_prefix(body) {
            return Some(meta_charset);
        }
    }

    charset_from_content_type(content_type)
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    for part in content_type.split(';').skip(1) {
        let Some((name, value)) = part.split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("charset") {
            continue;
        }

        let label = value.trim().trim_matches('"').trim_matches('\'');
        if !label.is_empty() {
            return Some(label.to_owned());
        }
    }

    None
}

fn charset_from_html_prefix(body: &[u8]) -> Option<String> {
    let prefix_len = body.len().min(8192);
    let prefix = String::from_utf8_lossy(&body[..prefix_len]);
    let lower = prefix.to_ascii_lowercase();
    let mut search_start = 0_usize;

    while let Some(relative) = lower[search_start..].find("charset=") {
        let charset_start = search_start + relative + "charset=".len();
        if let Some(label) = parse_charset_label(&prefix[charset_start..]) {
            return Some(label);
        }
        search_start = charset_start;
    }

    None
}

fn parse_charset_label(input: &str) -> Option<String> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    let mut chars = trimmed.chars();
    let first = chars.next()?;

    if first == '"' || first == '\'' {
        let rest = &trimmed[first.len_utf8()..];
        let end = rest.find(first)?;
        let label = rest[..end].trim();
        return if label.is_empty() {
            None
        } else {
            Some(label.to_owned())
        };
    }

    let end = trimmed
        .find(|ch: char| ch.is_whitespace() || matches!(ch, '"' | '\'' | ';' | '>' | '/'))
        .unwrap_or(trimmed.len());
    let label = trimmed[..end].trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::decode_text;
    use super::detect_charset;

    #[test]
    fn meta_charset_beats_header_charset() {
        let body = b"<html><head><meta charset=\"gbk\"></head></html>";
        let detected = detect_charset(body, "text/html; charset=utf-8");
        assert_eq!(detected.as_deref(), Some("gbk"));
    }

    #[test]
    fn header_charset_is_used_without_meta() {
        let detected = detect_charset(b"plain text", "text/plain; charset=iso-8859-1");
        assert_eq!(detected.as_deref(), Some("iso-8859-1"));
    }

    #[test]
    fn decodes_gbk_body() {
        // "中文" in GBK.
        let body = [0xD6, 0xD0, 0xCE, 0xC4];
        let decoded = decode_text(&body, "text/html; charset=gbk");
        assert_eq!(decoded, "中文");
    }

    #[test]
    fn unknown_charset_falls_back_to_lossy_utf8() {
        let decoded = decode_text(b"hello", "text/html; charset=made-up");
        assert_eq!(decoded, "hello");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let decoded = decode_text(&[b'o', b'k', 0xFF], "text/plain");
        assert!(decoded.starts_with("ok"));
    }
}
