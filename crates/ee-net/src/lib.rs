//! Page fetching: URL handling, a blocking HTTP/1.1 client with TLS, and
//! response text decoding.

pub mod charset;
pub mod client;
pub mod http;
pub mod tls;
pub mod url;

pub use client::FetchClient;
pub use client::FetchedPage;
pub use url::PageUrl;
pub use url::normalize_input_url;
