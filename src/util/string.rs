//! String helpers used when normalizing routing tokens.

/// Upper-case the first character of every word and drop the separators.
///
/// Words are split on `_`, `-` and spaces. The remainder of each word is
/// kept as written, so `"user_profile"` becomes `"UserProfile"` and
/// `"editURL"` becomes `"EditURL"`.
#[must_use]
pub fn pascal_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for word in input.split(['_', '-', ' ']).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Remove one trailing occurrence of `suffix`, if present.
#[must_use]
pub fn strip_suffix_once<'a>(input: &'a str, suffix: &str) -> &'a str {
    input.strip_suffix(suffix).unwrap_or(input)
}
