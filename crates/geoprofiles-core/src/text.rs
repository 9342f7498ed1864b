// crates/geoprofiles-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// Transliterates Unicode to ASCII (e.g. `Łódź` -> `Lodz`) and lowercases.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Builds a URL-safe slug.
///
/// The input is folded to lowercase ASCII, characters other than
/// alphanumerics, `_`, `-` and whitespace are dropped, runs of whitespace and
/// hyphens collapse to one `-`, and leading/trailing `-`/`_` are trimmed.
///
/// ```rust
/// use geoprofiles_core::text::slugify;
///
/// assert_eq!(slugify("Tract-42003140100"), "tract-42003140100");
/// assert_eq!(slugify("Block Group-420031401001"), "block-group-420031401001");
/// assert_eq!(slugify("  Mt. Lebanon  "), "mt-lebanon");
/// ```
pub fn slugify(s: &str) -> String {
    let folded = fold_key(s);
    let mut out = String::with_capacity(folded.len());
    let mut pending_sep = false;

    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_sep = true;
        }
    }

    out.trim_matches(|c| c == '-' || c == '_').to_string()
}
