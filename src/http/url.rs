//! Free-text URL normalization.
//!
//! The builder accepts whatever the user typed into the URL field. Before a
//! request is sent or saved the text is turned into an absolute URL:
//!
//! - surrounding whitespace is removed
//! - path-only input (`/users`) is rejected, there is no base to resolve it against
//! - protocol-relative input (`//host/path`) gets a scheme
//! - input without `scheme://` gets `http://` when it looks like an IPv4
//!   address or `localhost`, `https://` otherwise
//!
//! Send and save both go through [`normalize_url`], so a saved request stores
//! exactly the URL that would have been dispatched.

use crate::error::ValidationError;

pub fn normalize_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    if let Some(rest) = trimmed.strip_prefix("//") {
        return Ok(format!("{}//{rest}", default_scheme(rest)));
    }
    if trimmed.starts_with('/') {
        return Err(ValidationError::RelativeUrl);
    }

    if has_scheme(trimmed) {
        return Ok(trimmed.to_string());
    }

    Ok(format!("{}//{trimmed}", default_scheme(trimmed)))
}

fn default_scheme(host_and_path: &str) -> &'static str {
    if starts_with_ipv4(host_and_path) || host_and_path.starts_with("localhost") {
        "http:"
    } else {
        "https:"
    }
}

/// Case-insensitive `scheme://` prefix, scheme per RFC 3986
/// (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`).
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Dotted-quad prefix: four groups of one to three digits. Octet ranges are
/// not checked, `999.1.1.1` still counts as an address-looking host.
fn starts_with_ipv4(input: &str) -> bool {
    let bytes = input.as_bytes();
    let mut pos = 0;

    for group in 0..4 {
        let digits = bytes[pos..]
            .iter()
            .take(3)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return false;
        }
        pos += digits;

        if group < 3 {
            if bytes.get(pos) != Some(&b'.') {
                return false;
            }
            pos += 1;
        }
    }

    true
}
