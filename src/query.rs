//! Query-parameter rendering for option shapes
//!
//! Option shapes such as [`LogOptions`](crate::container::LogOptions) travel in
//! the request URL rather than the body. Pairs are returned unencoded; the
//! transport is responsible for percent-encoding.

/// A shape sent as URL query parameters
pub trait QueryParams {
    /// Parameter name/value pairs, in a stable order
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Render a boolean the way the daemon parses it
pub(crate) fn flag(value: bool) -> String {
    let raw = if value { "1" } else { "0" };
    raw.to_string()
}

/// Push a parameter only when the value is non-empty
pub(crate) fn push_non_empty(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    if !value.is_empty() {
        pairs.push((key, value.to_string()));
    }
}
