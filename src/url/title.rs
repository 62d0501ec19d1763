use crate::url::domain::site_label;
use url::{Host, Url};

/// Label used when neither the page nor the host yields anything readable
pub const FALLBACK_TITLE: &str = "Website";

/// Picks the human-readable label recorded next to each harvested address
///
/// A non-empty `<title>` wins (trimmed). Otherwise the title is derived from
/// the host: `www.acme.io` becomes `Acme`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use mailtrawl::url::resolve_title;
///
/// let url = Url::parse("https://www.acme.io/contact").unwrap();
/// assert_eq!(resolve_title(Some("  Acme Corp  "), &url), "Acme Corp");
/// assert_eq!(resolve_title(None, &url), "Acme");
/// ```
pub fn resolve_title(page_title: Option<&str>, url: &Url) -> String {
    match page_title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => fallback_title(url),
    }
}

/// Derives a title from the URL's host
///
/// IP literal hosts have no meaningful label and get [`FALLBACK_TITLE`].
pub fn fallback_title(url: &Url) -> String {
    let host = match url.host() {
        Some(Host::Domain(host)) => host,
        _ => return FALLBACK_TITLE.to_string(),
    };

    site_label(host)
        .filter(|label| !label.is_empty())
        .map(capitalize)
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Upper-cases the first character and lower-cases the rest
fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
