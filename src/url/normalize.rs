use crate::{UrlError, UrlResult};
use url::Url;

/// Click-tracking query parameters added by ad and mail platforms
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "msclkid", "_ga"];

/// Canonicalizes a URL into the key used by the visited set
///
/// The key only decides whether two links name the same page. It is never
/// fetched and never used to resolve relative links; see [`fetch_target`].
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only `http` and `https`
/// 3. Host is lower-cased and default ports dropped (done by the parser)
/// 4. Collapse duplicate slashes and dot segments; drop trailing slash except for root
/// 5. Remove fragment
/// 6. Remove tracking query parameters and sort the rest by key
///
/// # Examples
///
/// ```
/// use wordforge::url::canonicalize_url;
///
/// let url = canonicalize_url("http://EXAMPLE.COM:80/docs/?b=2&a=1#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/docs?a=1&b=2");
/// ```
pub fn canonicalize_url(url_str: &str) -> UrlResult<Url> {
    canonicalize(parse(url_str)?)
}

/// Canonicalizes an already-parsed URL
pub fn canonicalize(mut url: Url) -> UrlResult<Url> {
    check_crawlable(&url)?;

    let path = normalize_path(url.path());
    url.set_path(&path);
    url.set_fragment(None);

    if url.query().is_some() {
        let params = filter_and_sort_query_params(&url);
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    Ok(url)
}

/// Visited-set key of a fetch target, `None` if it cannot be crawled
pub fn visit_key(url: &Url) -> Option<String> {
    canonicalize(url.clone()).ok().map(String::from)
}

/// Prepares a URL for fetching: only the fragment is removed
///
/// Path, trailing slash and query stay exactly as the site wrote them, so the
/// server sees the real page and relative links resolve against the right
/// directory.
///
/// # Examples
///
/// ```
/// use wordforge::url::parse_fetch_target;
///
/// let url = parse_fetch_target("http://example.com/docs/?source=nav#intro").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/docs/?source=nav");
/// ```
pub fn fetch_target(mut url: Url) -> UrlResult<Url> {
    check_crawlable(&url)?;
    url.set_fragment(None);
    Ok(url)
}

/// Parses and prepares a fetch target
pub fn parse_fetch_target(url_str: &str) -> UrlResult<Url> {
    fetch_target(parse(url_str)?)
}

fn parse(url_str: &str) -> UrlResult<Url> {
    Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))
}

fn check_crawlable(url: &Url) -> UrlResult<()> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(())
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    params.sort();
    params
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
