use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Candidate address pattern, ASCII letters of either case
///
/// Local part: letters, digits and `._%+-`. Domain: letters, digits, dots and
/// hyphens, ending in a dot and a top-level label of two or more letters.
/// The classes are spelled out rather than using `(?i)`, which under Unicode
/// case folding would also admit the long s (U+017F) and the Kelvin sign (U+212A).
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"))
}

/// Extracts the distinct candidate addresses found in `text`
///
/// Matches are returned exactly as captured, so `Info@Example.com` and
/// `info@example.com` are two different candidates.
///
/// # Examples
///
/// ```
/// use mailtrawl::extract::extract_emails;
///
/// let found = extract_emails("Write to sales@acme.io or sales@acme.io today");
/// assert_eq!(found.len(), 1);
/// assert!(found.contains("sales@acme.io"));
/// ```
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    email_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
