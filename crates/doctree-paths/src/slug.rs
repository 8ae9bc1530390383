//! Title to URL identifier conversion.

use std::sync::LazyLock;

use regex::Regex;

/// Separator used in place of whitespace and dashes.
const SEPARATOR: &str = "_";

static DASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Anything outside letters, digits, whitespace, the separator and `!'(),.+*$`.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^_!'(),.+*$\p{L}\p{N}\s]+").unwrap());

static SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_\s]+").unwrap());

static SORTING_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^-?[0-9]*_?(.*)$").unwrap());

/// Generate a URL-friendly identifier from arbitrary title text.
///
/// The text is transliterated to ASCII (characters without a transliteration
/// are dropped), stripped of non-printable characters, and reduced to letters,
/// digits and `!'(),.+*$`. Dashes and runs of whitespace become a single `_`,
/// and leading or trailing `_` are trimmed.
///
/// # Examples
///
/// ```
/// use doctree_paths::slug;
///
/// assert_eq!(slug("Hello, World!"), "Hello,_World!");
/// assert_eq!(slug("Über-Größe"), "Uber_Grosse");
/// ```
#[must_use]
pub fn slug(title: &str) -> String {
    let ascii = transliterate(title);

    let printable: String = ascii.chars().filter(|c| matches!(c, ' '..='~')).collect();

    let dashed = DASHES_RE.replace_all(&printable, SEPARATOR);
    let allowed = DISALLOWED_RE.replace_all(&dashed, "");
    let separated = SEPARATORS_RE.replace_all(&allowed, SEPARATOR);

    separated.trim_matches('_').to_owned()
}

/// Convert text to ASCII, dropping characters that have no ASCII form.
fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dropped = 0usize;

    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        match deunicode::deunicode_char(c) {
            Some(ascii) => out.push_str(ascii),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(text, dropped, "Dropped characters without ASCII transliteration");
    }

    out
}

/// Remove a leading sorting prefix such as `01_` or `-` from a file name.
///
/// Content authors order siblings by prefixing names with digits. The prefix
/// (an optional `-`, digits, and one optional `_`) is removed only when
/// something remains afterwards, so a purely numeric name is kept as-is.
///
/// # Examples
///
/// ```
/// use doctree_paths::remove_sorting_prefix;
///
/// assert_eq!(remove_sorting_prefix("01_Getting_Started"), "Getting_Started");
/// assert_eq!(remove_sorting_prefix("-Appendix"), "Appendix");
/// assert_eq!(remove_sorting_prefix("2024"), "2024");
/// ```
#[must_use]
pub fn remove_sorting_prefix(name: &str) -> &str {
    match SORTING_PREFIX_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    {
        Some(rest) if !rest.is_empty() => rest,
        _ => name,
    }
}
