//! Link filter deciding which harvested links join the frontier

use crate::url::domain::same_host;
use url::Url;

/// Raw href prefixes that never lead to crawlable content
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:", "#"];

/// Path suffixes for binaries, documents, archives, images, stylesheets and scripts
const SKIPPED_EXTENSIONS: &[&str] = &[
    // documents and archives
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "zip", "rar", "tar", "gz",
    // images
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp",
    // stylesheets and scripts
    "css", "js",
];

/// Decides whether a harvested link should be followed
///
/// `candidate` is the raw `href` value as found in the document; `referrer` is
/// the page it was found on. Relative candidates are resolved against the
/// referrer before the host check.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wordforge::url::should_follow;
///
/// let referrer = Url::parse("http://example.com/a").unwrap();
/// assert!(should_follow("/page2", &referrer));
/// assert!(!should_follow("http://other.com/x", &referrer));
/// assert!(!should_follow("/file.PDF?download=1", &referrer));
/// ```
pub fn should_follow(candidate: &str, referrer: &Url) -> bool {
    follow_target(candidate, referrer).is_some()
}

/// Resolves a harvested link and returns it only if it should be followed
///
/// The returned URL is ready to fetch: absolute, fragment removed, path and
/// query untouched.
pub fn follow_target(candidate: &str, referrer: &Url) -> Option<Url> {
    let candidate = candidate.trim();
    if candidate.is_empty() || has_skipped_prefix(candidate) {
        return None;
    }

    let mut resolved = referrer.join(candidate).ok()?;
    resolved.set_fragment(None);
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    if !same_host(&resolved, referrer) {
        return None;
    }

    if has_skipped_extension(resolved.path()) {
        return None;
    }

    Some(resolved)
}

fn has_skipped_prefix(candidate: &str) -> bool {
    let lowered = candidate.to_ascii_lowercase();
    SKIPPED_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Checks the last path segment's extension; query and fragment are already split off
fn has_skipped_extension(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            SKIPPED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
