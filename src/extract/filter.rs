//! Address filter applied at save time
//!
//! A candidate is kept only when all of these hold:
//! - it does not start with a digit
//! - it is entirely lowercase as captured
//! - it contains no hyphen
//! - it does not contain `gdpr` (privacy-notice placeholders)

/// Returns true if the candidate may be written to the store
pub fn is_acceptable(address: &str) -> bool {
    let starts_with_digit = address
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_digit());

    !starts_with_digit && is_lowercase(address) && !address.contains('-') && !address.contains("gdpr")
}

/// Has at least one cased character and no uppercase ones
fn is_lowercase(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

/// Splits candidates into those that pass the filter and those that don't
///
/// Order is preserved within each side.
pub fn partition_acceptable<T, F>(items: Vec<T>, address_of: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> &str,
{
    items
        .into_iter()
        .partition(|item| is_acceptable(address_of(item)))
}
