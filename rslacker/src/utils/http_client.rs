use std::sync::OnceLock;

use tracing::debug;

pub fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
            // Safe to ignore: can happen if another crate installed it first.
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// Build the `reqwest::Client` used for webhook delivery.
///
/// Uses the transport defaults; no request timeout is configured.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    install_rustls_provider();
    reqwest::Client::builder()
        .user_agent(concat!("rslacker/", env!("CARGO_PKG_VERSION")))
        .build()
}
