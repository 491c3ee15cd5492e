//! Shared utilities for link destination classification.

/// What a markdown link destination points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Another file, by relative or absolute path
    File,
    /// `http://`, `https://`, `mailto:` and other URL schemes
    External,
    /// Heading in the same document: `#section`
    Anchor,
}

/// Classify a link destination.
///
/// # Examples
///
/// ```
/// use notesearcher_parser::parsers::link_utils::{LinkTarget, classify_destination};
///
/// assert_eq!(classify_destination("https://example.com"), LinkTarget::External);
/// assert_eq!(classify_destination("mailto:me@example.com"), LinkTarget::External);
/// assert_eq!(classify_destination("#section"), LinkTarget::Anchor);
/// assert_eq!(classify_destination("../a.md"), LinkTarget::File);
/// assert_eq!(classify_destination("c:\\notes\\a.md"), LinkTarget::File);
/// ```
pub fn classify_destination(destination: &str) -> LinkTarget {
    if destination.starts_with('#') {
        return LinkTarget::Anchor;
    }

    if has_url_scheme(destination) {
        return LinkTarget::External;
    }

    LinkTarget::File
}

/// `scheme:` prefix of two or more characters. A single letter followed by
/// `:` is a drive letter, not a scheme.
fn has_url_scheme(destination: &str) -> bool {
    match destination.split_once(':') {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Strip the optional `"title"` and `<...>` wrapping from a raw destination.
pub fn clean_destination(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed.strip_prefix('<')
        && let Some(end) = inner.find('>')
    {
        return inner[..end].trim();
    }

    match trimmed.find(" \"") {
        Some(pos) if trimmed.ends_with('"') => trimmed[..pos].trim_end(),
        _ => trimmed,
    }
}
