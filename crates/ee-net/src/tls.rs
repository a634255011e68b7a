//! rustls-backed TLS connector.

use crate::client::BoxedIoStream;
use ee_core::EyeError;
use ee_core::EyeResult;
use std::net::TcpStream;

#[cfg(feature = "tls-rustls")]
pub fn connect_tls(mut stream: TcpStream, server_name: &str) -> EyeResult<BoxedIoStream> {
    use rustls::ClientConfig;
    use rustls::ClientConnection;
    use rustls::RootCertStore;
    use rustls::StreamOwned;
    use rustls::pki_types::ServerName;
    use std::sync::Arc;

    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let name = ServerName::try_from(server_name.to_owned()).map_err(|error| {
        EyeError::new(
            "fetch.tls_server_name_invalid",
            format!("invalid TLS server name `{server_name}`: {error}"),
        )
    })?;

    let mut connection = ClientConnection::new(Arc::new(config), name).map_err(|error| {
        EyeError::new(
            "fetch.tls_init_failed",
            format!("failed to initialize TLS connection for `{server_name}`: {error}"),
        )
    })?;

    connection.complete_io(&mut stream).map_err(|error| {
        EyeError::new(
            "fetch.tls_handshake_failed",
            format!("TLS handshake failed for `{server_name}`: {error}"),
        )
    })?;

    Ok(Box::new(StreamOwned::new(connection, stream)))
}

#[cfg(not(feature = "tls-rustls"))]
pub fn connect_tls(_stream: TcpStream, server_name: &str) -> EyeResult<BoxedIoStream> {
    Err(EyeError::new(
        "fetch.tls_unavailable",
        format!("TLS support is disabled for this build; cannot reach `{server_name}` over HTTPS"),
    ))
}
