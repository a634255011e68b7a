use super::*;
use ee_net::FetchClient;
use tracing::info;
use tracing::warn;

/// Fetches a page and parses HTML off the UI thread. Tree building stays
/// on the UI thread, so the worker only ships the parsed document.
pub(super) fn load_page(url: &str, timeout: Duration) -> Result<ParsedPage, String> {
    let client = FetchClient::new(timeout);
    let page = client.fetch(url).map_err(|error| error.to_string())?;
    info!(url, status = page.status, bytes = page.body.len(), "page fetched");

    let text = page.text();
    let parse_as_html = page.is_html() || looks_like_markup(&text);

    let (document, title) = if parse_as_html {
        let document = ee_html::HtmlDocument::parse(&text);
        let title = document.title();
        (Some(document), title)
    } else {
        warn!(url, content_type = %page.content_type, "response is not HTML");
        (None, None)
    };

    Ok(ParsedPage {
        final_url: page.final_url,
        status: page.status,
        http_version: page.http_version,
        content_type: page.content_type,
        headers: page.headers,
        body_bytes: page.body.len(),
        title,
        document,
        text_preview: truncate_preview_text(&text, MAX_PREVIEW_BYTES),
    })
}

/// Parses a local HTML file the same way a fetched page is parsed.
pub(super) fn load_local_file(path: &str) -> Result<ParsedPage, String> {
    let text = std::fs::read_to_string(path).map_err(|error| error.to_string())?;
    let body_bytes = text.len();
    let document = ee_html::HtmlDocument::parse(&text);
    let title = document.title();

    Ok(ParsedPage {
        final_url: path.to_owned(),
        status: 200,
        http_version: "file".to_owned(),
        content_type: "text/html".to_owned(),
        headers: Vec::new(),
        body_bytes,
        title,
        document: Some(document),
        text_preview: truncate_preview_text(&text, MAX_PREVIEW_BYTES),
    })
}

/// A non-HTML content type still gets a tree when the body plainly starts
/// with markup (servers frequently mislabel HTML as text/plain).
fn looks_like_markup(text: &str) -> bool {
    text.trim_start().starts_with('<')
}

fn truncate_preview_text(input: &str, max_bytes: usize) -> String {
    if input.len() <= max_bytes {
        return input.to_owned();
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    input[..end].to_owned()
}

include!("tests.rs");
