use url::Url;

/// Returns the origin of a URL: scheme, host and any non-default port
///
/// This is the key robots.txt decisions are cached under, so two URLs on
/// `https://example.com` share one decision while `http://example.com` and
/// `https://example.com:8443` each get their own.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use mailtrawl::url::origin_key;
///
/// let url = Url::parse("https://example.com/contact?x=1").unwrap();
/// assert_eq!(origin_key(&url), "https://example.com");
/// ```
pub fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Returns the label just before the public suffix, e.g. `example` for
/// `www.example.com`
///
/// Hosts with a single label (`localhost`) have no such label.
pub fn site_label(host: &str) -> Option<&str> {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 1 {
        Some(labels[labels.len() - 2])
    } else {
        None
    }
}
