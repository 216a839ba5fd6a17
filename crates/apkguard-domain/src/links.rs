//! App link extraction and digital asset links verification.
//!
//! Browsable intent-filters declare the URLs an activity handles. For every `http`/`https`
//! host the domain owner is expected to publish `/.well-known/assetlinks.json` naming the
//! app's signing certificate. Verification fetches each candidate once, concurrently, on a
//! pool scoped to one activity.

use crate::error::AnalysisError;
use crate::model::ManifestNode;
use apkguard_types::{BrowsableLinkProfile, ExposureFinding, ids};
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{error, info, warn};
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;
use url::{Host, Url};

pub const WELL_KNOWN_PATH: &str = "/.well-known/assetlinks.json";

/// A verification record must mention this key to count as present.
pub const CERT_FINGERPRINT_KEY: &str = "sha256_cert_fingerprints";

const BROWSABLE_CATEGORY: &str = "android.intent.category.BROWSABLE";

/// Collect the deep-link surface of an activity.
///
/// Only `<data>` elements under intent-filters carrying the BROWSABLE category count,
/// accumulated across every such filter.
pub fn extract_link_profile(activity: &ManifestNode, ns: &str) -> BrowsableLinkProfile {
    let mut profile = BrowsableLinkProfile::default();

    for filter in activity.descendants("intent-filter") {
        let browsable = filter
            .descendants("category")
            .iter()
            .any(|c| c.attr(ns, "name") == Some(BROWSABLE_CATEGORY));
        if !browsable {
            continue;
        }
        for data in filter.descendants("data") {
            collect_data(data, ns, &mut profile);
        }
    }

    profile.browsable = !profile.schemes.is_empty();
    profile
}

fn insert(set: &mut IndexSet<String>, value: Option<&str>) {
    if let Some(v) = value {
        set.insert(v.to_string());
    }
}

fn collect_data(data: &ManifestNode, ns: &str, profile: &mut BrowsableLinkProfile) {
    let get = |local: &str| data.attr(ns, local);

    let scheme = get("scheme");
    let host = get("host");
    let port = get("port");

    if let Some(s) = scheme {
        profile.schemes.insert(format!("{s}://"));
    }
    insert(&mut profile.mime_types, get("mimeType"));
    insert(&mut profile.hosts, host);
    insert(&mut profile.ports, port);
    insert(&mut profile.paths, get("path"));
    insert(&mut profile.path_prefixes, get("pathPrefix"));
    insert(&mut profile.path_patterns, get("pathPattern"));

    let (Some(scheme @ ("http" | "https")), Some(host)) = (scheme, host) else {
        return;
    };
    if host == "*" {
        return;
    }

    let host = host.replace("*.", "").replace('#', "");
    if !valid_host(&host) {
        warn!(host = %host, "invalid app link host");
        return;
    }

    let origin = match port.and_then(|p| p.parse::<u16>().ok()) {
        Some(port) => format!("{scheme}://{host}:{port}"),
        None => format!("{scheme}://{host}"),
    };
    profile
        .well_known_candidates
        .insert(format!("{origin}{WELL_KNOWN_PATH}"), origin);
}

/// Syntax check for an app-link host: a well-formed DNS name other than `localhost`, or a
/// public IPv4 literal. Names are not resolved here; the fetcher checks resolved addresses.
pub fn valid_host(host: &str) -> bool {
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    match Host::parse(host) {
        Ok(Host::Domain(domain)) => {
            domain != "localhost"
                && domain.split('.').all(|label| {
                    !label.is_empty()
                        && label.len() <= 63
                        && !label.starts_with('-')
                        && !label.ends_with('-')
                        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                })
        }
        Ok(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Ok(Host::Ipv6(_)) | Err(_) => false,
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast())
}

/// Whether a resolved address may be contacted. IPv6 only passes for globally routed unicast.
pub fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_ipv4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_ipv4(v4),
            None => {
                !(v6.is_loopback()
                    || v6.is_unspecified()
                    || v6.is_multicast()
                    || v6.is_unique_local()
                    || v6.is_unicast_link_local())
            }
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// Performs one GET of a verification URL. Implementations must not follow redirects.
pub trait AssetLinkFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<FetchedResponse, FetchError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub url: String,
    pub origin: String,
    pub http_status: Option<u16>,
    pub verified: bool,
}

impl VerificationOutcome {
    /// `well_known_assetlinks` for unverified outcomes.
    pub fn to_finding(&self, activity: &str) -> Option<ExposureFinding> {
        if self.verified {
            return None;
        }
        let status = self
            .http_status
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        Some(ExposureFinding::new(
            ids::RULE_WELL_KNOWN_ASSETLINKS,
            vec![activity.to_string(), self.origin.clone()],
            vec![self.url.clone(), status],
        ))
    }
}

/// The path must be exactly the well-known path, with no query or `;` parameters.
fn is_well_known_url(url: &Url) -> bool {
    url.path() == WELL_KNOWN_PATH && url.query().is_none() && !url.path().contains(';')
}

/// Check one candidate: the URL itself, then its `https://` upgrade when it was `http://`.
pub fn check_candidate(
    url: &str,
    origin: &str,
    fetcher: &dyn AssetLinkFetcher,
) -> VerificationOutcome {
    let mut attempts = vec![url.to_string()];
    if let Some(rest) = url.strip_prefix("http://") {
        attempts.push(format!("https://{rest}"));
    }

    let mut http_status = None;
    let mut verified = false;

    for attempt in &attempts {
        let parsed = match Url::parse(attempt) {
            Ok(parsed) if is_well_known_url(&parsed) => parsed,
            _ => {
                warn!(url = %attempt, "invalid assetlinks URL, not fetching");
                continue;
            }
        };

        match fetcher.fetch(&parsed) {
            Ok(response) => {
                http_status = Some(response.status);
                if (200..300).contains(&response.status)
                    && response.body.contains(CERT_FINGERPRINT_KEY)
                {
                    verified = true;
                    break;
                }
            }
            Err(err) => {
                error!(url = %url, error = %err, "well-known assetlinks check failed");
                return VerificationOutcome {
                    url: url.to_string(),
                    origin: origin.to_string(),
                    http_status: None,
                    verified: false,
                };
            }
        }
    }

    if let Some(status @ (301 | 302)) = http_status {
        warn!(url = %url, status, "redirecting to a different URL, skipping check");
    }

    VerificationOutcome {
        url: url.to_string(),
        origin: origin.to_string(),
        http_status,
        verified,
    }
}

/// Requests are network-bound, so the pool is wider than the CPU count: cores + 4, at most 32.
fn pool_size() -> usize {
    std::thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .saturating_add(4)
        .min(32)
}

/// Verify every candidate of one activity and join before returning.
///
/// Outcomes keep candidate order. No pool is built when there is nothing to check.
pub fn verify(
    activity: &str,
    candidates: &IndexMap<String, String>,
    fetcher: &dyn AssetLinkFetcher,
) -> Result<Vec<VerificationOutcome>, AnalysisError> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(pool_size())
        .thread_name(|i| format!("assetlinks-{i}"))
        .build()?;

    let work: Vec<(&String, &String)> = candidates.iter().collect();
    let outcomes: Vec<VerificationOutcome> = pool.install(|| {
        work.par_iter()
            .map(|(url, origin)| {
                info!(activity, origin = %origin, "app link assetlinks check");
                check_candidate(url, origin, fetcher)
            })
            .collect()
    });

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeFetcher, browsable_filter, data, node};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    const URL: &str = "https://example.com/.well-known/assetlinks.json";

    #[test]
    fn profile_collects_only_browsable_filters() {
        let activity = node("activity", &[("android:name", "a.Main")])
            .with_child(browsable_filter(vec![data(&[
                ("android:scheme", "https"),
                ("android:host", "example.com"),
                ("android:pathPrefix", "/app"),
            ])]))
            .with_child(
                node("intent-filter", &[])
                    .with_child(data(&[("android:scheme", "geo"), ("android:host", "ignored.com")])),
            );

        let profile = extract_link_profile(&activity, "android");
        assert!(profile.browsable);
        assert_eq!(profile.schemes.iter().collect::<Vec<_>>(), vec!["https://"]);
        assert_eq!(profile.hosts.iter().collect::<Vec<_>>(), vec!["example.com"]);
        assert_eq!(profile.path_prefixes.iter().collect::<Vec<_>>(), vec!["/app"]);
        assert_eq!(profile.well_known_candidates.get(URL).map(String::as_str), Some("https://example.com"));
    }

    #[test]
    fn profile_accumulates_across_filters_and_dedups() {
        let activity = node("activity", &[])
            .with_child(browsable_filter(vec![data(&[("android:scheme", "https"), ("android:host", "a.com")])]))
            .with_child(browsable_filter(vec![
                data(&[("android:scheme", "https"), ("android:host", "b.com")]),
                data(&[("android:scheme", "https"), ("android:host", "a.com")]),
            ]));

        let profile = extract_link_profile(&activity, "android");
        assert_eq!(profile.hosts.iter().collect::<Vec<_>>(), vec!["a.com", "b.com"]);
        assert_eq!(profile.well_known_candidates.len(), 2);
    }

    #[test]
    fn candidate_rules_for_hosts_and_ports() {
        let activity = node("activity", &[]).with_child(browsable_filter(vec![
            data(&[("android:scheme", "https"), ("android:host", "*")]),
            data(&[("android:scheme", "https"), ("android:host", "*.wild.example.com")]),
            data(&[("android:scheme", "http"), ("android:host", "port.example.com"), ("android:port", "8443")]),
            data(&[("android:scheme", "https"), ("android:host", "bad host")]),
            data(&[("android:scheme", "myapp"), ("android:host", "custom.example.com")]),
            data(&[("android:scheme", "https"), ("android:host", "np.example.com"), ("android:port", "abc")]),
        ]));

        let profile = extract_link_profile(&activity, "android");
        let candidates: Vec<(&str, &str)> = profile
            .well_known_candidates
            .iter()
            .map(|(u, o)| (u.as_str(), o.as_str()))
            .collect();
        assert_eq!(
            candidates,
            vec![
                (
                    "https://wild.example.com/.well-known/assetlinks.json",
                    "https://wild.example.com"
                ),
                (
                    "http://port.example.com:8443/.well-known/assetlinks.json",
                    "http://port.example.com:8443"
                ),
                (
                    "https://np.example.com/.well-known/assetlinks.json",
                    "https://np.example.com"
                ),
            ]
        );
        // The raw host is still part of the profile.
        assert!(profile.hosts.contains("bad host"));
    }

    #[test]
    fn no_scheme_means_not_browsable() {
        let activity = node("activity", &[])
            .with_child(browsable_filter(vec![data(&[("android:host", "example.com")])]));
        let profile = extract_link_profile(&activity, "android");
        assert!(!profile.browsable);
        assert!(profile.well_known_candidates.is_empty());
    }

    #[test]
    fn host_validation() {
        assert!(valid_host("example.com"));
        assert!(valid_host("sub-domain.example.co.uk"));
        assert!(valid_host("93.184.216.34"));
        assert!(!valid_host(""));
        assert!(!valid_host("localhost"));
        assert!(!valid_host("127.0.0.1"));
        assert!(!valid_host("10.0.0.1"));
        assert!(!valid_host("exa mple.com"));
        assert!(!valid_host("example.com/path"));
        assert!(!valid_host("-bad.example.com"));
    }

    #[test]
    fn fingerprint_body_with_2xx_verifies() {
        let fetcher = FakeFetcher::new().respond(URL, 200, r#"[{"target":{"sha256_cert_fingerprints":["AA"]}}]"#);
        let outcome = check_candidate(URL, "https://example.com", &fetcher);
        assert!(outcome.verified);
        assert_eq!(outcome.http_status, Some(200));
        assert!(outcome.to_finding("a.Main").is_none());
    }

    #[test]
    fn redirect_is_unverified_with_status() {
        let fetcher = FakeFetcher::new().respond(URL, 301, "");
        let outcome = check_candidate(URL, "https://example.com", &fetcher);
        assert!(!outcome.verified);
        assert_eq!(outcome.http_status, Some(301));

        let finding = outcome.to_finding("a.Main").expect("finding");
        assert_eq!(finding.rule_key, ids::RULE_WELL_KNOWN_ASSETLINKS);
        assert_eq!(finding.component_args, vec!["a.Main", "https://example.com"]);
        assert_eq!(finding.extra_args, vec![URL, "301"]);
    }

    #[test]
    fn success_without_fingerprint_is_unverified() {
        let fetcher = FakeFetcher::new().respond(URL, 200, "[]");
        let outcome = check_candidate(URL, "https://example.com", &fetcher);
        assert!(!outcome.verified);
        assert_eq!(outcome.http_status, Some(200));
    }

    #[test]
    fn http_candidate_is_upgraded_to_https() {
        let http = "http://example.com/.well-known/assetlinks.json";
        let fetcher = FakeFetcher::new()
            .respond(http, 404, "")
            .respond(URL, 200, "sha256_cert_fingerprints");
        let outcome = check_candidate(http, "http://example.com", &fetcher);
        assert!(outcome.verified);
        assert_eq!(outcome.url, http);
        assert_eq!(fetcher.requested(), vec![http.to_string(), URL.to_string()]);
    }

    #[test]
    fn malformed_urls_are_never_fetched() {
        let fetcher = FakeFetcher::new();
        for url in [
            "https://example.com/other.json",
            "https://example.com/.well-known/assetlinks.json?x=1",
            "https://example.com/.well-known/assetlinks.json;p=1",
        ] {
            let outcome = check_candidate(url, "https://example.com", &fetcher);
            assert!(!outcome.verified);
            assert_eq!(outcome.http_status, None);
        }
        assert!(fetcher.requested().is_empty());
    }

    #[test]
    fn transport_error_degrades_only_that_candidate() {
        let ok = "https://ok.example.com/.well-known/assetlinks.json";
        let down = "https://down.example.com/.well-known/assetlinks.json";
        let fetcher = FakeFetcher::new()
            .respond(ok, 200, "sha256_cert_fingerprints")
            .fail(down);

        let mut candidates = IndexMap::new();
        candidates.insert(down.to_string(), "https://down.example.com".to_string());
        candidates.insert(ok.to_string(), "https://ok.example.com".to_string());

        let outcomes = verify("a.Main", &candidates, &fetcher).expect("verify");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].url, down);
        assert_eq!(outcomes[0].http_status, None);
        assert!(!outcomes[0].verified);
        assert_eq!(outcomes[1].url, ok);
        assert!(outcomes[1].verified);
    }

    /// Records how many fetches overlap; each one holds its slot for a while.
    #[derive(Default)]
    struct SlowFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        completed: AtomicUsize,
    }

    impl AssetLinkFetcher for SlowFetcher {
        fn fetch(&self, _url: &Url) -> Result<FetchedResponse, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(300));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(FetchedResponse {
                status: 404,
                body: String::new(),
            })
        }
    }

    #[test]
    fn candidates_are_checked_concurrently_and_joined() {
        let mut candidates = IndexMap::new();
        for i in 0..5 {
            candidates.insert(
                format!("https://h{i}.example.com{WELL_KNOWN_PATH}"),
                format!("https://h{i}.example.com"),
            );
        }
        let fetcher = SlowFetcher::default();

        let started = Instant::now();
        let outcomes = verify("a.Main", &candidates, &fetcher).expect("verify");
        let elapsed = started.elapsed();

        assert!(pool_size() >= 5);
        assert!(
            fetcher.max_in_flight.load(Ordering::SeqCst) > 1,
            "candidates were checked one at a time"
        );
        assert!(elapsed < Duration::from_millis(1200), "took {elapsed:?}");

        // Nothing is still running once verify returns.
        assert_eq!(fetcher.completed.load(Ordering::SeqCst), 5);
        assert_eq!(fetcher.in_flight.load(Ordering::SeqCst), 0);
        let urls: Vec<&str> = outcomes.iter().map(|o| o.url.as_str()).collect();
        let expected: Vec<&str> = candidates.keys().map(String::as_str).collect();
        assert_eq!(urls, expected);
        assert!(outcomes.iter().all(|o| o.http_status == Some(404) && !o.verified));
    }

    #[test]
    fn resolved_address_filter() {
        assert!(is_public_ip("93.184.216.34".parse().expect("ip")));
        assert!(is_public_ip("2606:2800:220:1::1".parse().expect("ip")));
        assert!(!is_public_ip("192.168.1.10".parse().expect("ip")));
        assert!(!is_public_ip("169.254.169.254".parse().expect("ip")));
        assert!(!is_public_ip("::1".parse().expect("ip")));
        assert!(!is_public_ip("fd00::1".parse().expect("ip")));
        assert!(!is_public_ip("fe80::1".parse().expect("ip")));
        assert!(!is_public_ip("::ffff:10.0.0.1".parse().expect("ip")));
    }

    #[test]
    fn no_candidates_means_no_requests() {
        let fetcher = FakeFetcher::new();
        let outcomes = verify("a.Main", &IndexMap::new(), &fetcher).expect("verify");
        assert!(outcomes.is_empty());
        assert!(fetcher.requested().is_empty());
    }
}
