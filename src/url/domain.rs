use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lower-cased host, or `None` for URLs without one.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wordforge::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs point at the same host and explicit port
///
/// The scheme is ignored so `http://` and `https://` links on one site stay in
/// bounds, but an explicit port is part of the boundary: `example.com:8080` is
/// a different site from `example.com`.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(ha), Some(hb)) => ha == hb && a.port() == b.port(),
        _ => false,
    }
}

/// Builds a filesystem-friendly label for a URL's host, e.g. for output names
pub fn host_label(url: &Url) -> String {
    let host = extract_domain(url).unwrap_or_else(|| "site".to_string());
    match url.port() {
        Some(port) => format!("{}_{}", host, port),
        None => host,
    }
}
