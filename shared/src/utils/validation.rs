//! Email validation and masking utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email format check, not a full RFC 5322 parser.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Check whether a string looks like a deliverable email address
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 255 && EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the domain:
/// `alice@example.com` becomes `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => String::from("***"),
    }
}
