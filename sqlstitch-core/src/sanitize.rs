use crate::Value;

/// Validate free-form input against an allowed set, returning the matched
/// entry so callers splice the vetted constant rather than the raw input.
pub fn white_list<'a>(input: &str, allowed: &'a [&'a str]) -> Option<&'a str> {
    allowed.iter().copied().find(|candidate| *candidate == input)
}

/// Keep only the allowed keys of a keyed argument, preserving order.
///
/// Typical use is narrowing caller-supplied data before it reaches a `?u`
/// set clause, so a client cannot smuggle assignments to columns the
/// statement never meant to touch.
pub fn filter_keys(pairs: Vec<(String, Value)>, allowed: &[&str]) -> Vec<(String, Value)> {
    pairs
        .into_iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .collect()
}
