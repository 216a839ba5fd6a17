//! Blocking HTTP fetcher for Digital Asset Links verification.

use apkguard_domain::links::{AssetLinkFetcher, FetchError, FetchedResponse, is_public_ip};
use apkguard_settings::NetworkSettings;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::io::Read;
use std::net::ToSocketAddrs;
use url::Url;

/// Bodies are read up to this many bytes; an asset-links file is far smaller.
pub const MAX_BODY_BYTES: u64 = 512 * 1024;

/// Fetches well-known asset-link files with `reqwest`.
///
/// A client is built for every request from the configured network settings. Redirects are
/// never followed, no cookies are kept, and hosts resolving to non-public addresses are not
/// contacted.
#[derive(Clone, Debug, Default)]
pub struct ReqwestFetcher {
    settings: NetworkSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: NetworkSettings) -> Self {
        Self { settings }
    }

    fn client(&self, url: &Url) -> Result<Client, FetchError> {
        let mut builder = Client::builder()
            .redirect(Policy::none())
            .timeout(self.settings.timeout)
            .danger_accept_invalid_certs(!self.settings.verify_tls);

        builder = match self.settings.proxy.as_deref() {
            Some(proxy) => {
                let proxy = reqwest::Proxy::all(proxy).map_err(|e| transport(url, &e))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        builder.build().map_err(|e| transport(url, &e))
    }

    /// GET without the address check.
    fn get(&self, url: &Url) -> Result<FetchedResponse, FetchError> {
        let client = self.client(url)?;
        let response = client
            .get(url.clone())
            .send()
            .map_err(|e| classify(url, e))?;

        let status = response.status().as_u16();
        let mut buf = Vec::new();
        response
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut buf)
            .map_err(|e| read_error(url, &e))?;
        Ok(FetchedResponse {
            status,
            body: String::from_utf8_lossy(&buf).into_owned(),
        })
    }
}

impl AssetLinkFetcher for ReqwestFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedResponse, FetchError> {
        ensure_public_target(url)?;
        self.get(url)
    }
}

/// Resolve the host and refuse to connect when any address is private, loopback, or local.
fn ensure_public_target(url: &Url) -> Result<(), FetchError> {
    let refused = |message: String| FetchError::Transport {
        url: url.to_string(),
        message,
    };

    let host = url.host_str().ok_or_else(|| refused("URL has no host".to_string()))?;
    let port = url.port_or_known_default().unwrap_or(443);
    let addrs: Vec<_> = (host, port)
        .to_socket_addrs()
        .map_err(|e| refused(format!("cannot resolve {host}: {e}")))?
        .collect();

    if addrs.is_empty() {
        return Err(refused(format!("{host} resolved to no addresses")));
    }
    if let Some(addr) = addrs.iter().find(|a| !is_public_ip(a.ip())) {
        return Err(refused(format!("{host} resolves to non-public address {}", addr.ip())));
    }
    Ok(())
}

fn classify(url: &Url, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        transport(url, &err)
    }
}

fn read_error(url: &Url, err: &std::io::Error) -> FetchError {
    if err.kind() == std::io::ErrorKind::TimedOut {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

fn transport(url: &Url, err: &reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}
