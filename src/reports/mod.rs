//! Builders that turn inspection and invoice data into [`Report`](crate::Report)s.
//!
//! The data types deserialize with `serde`, so they can be read straight from
//! the JSON the rest of the system stores. Missing values never fail a build:
//! the client falls back to "Not Specified" and everything else to "N/A".

mod inspection;
mod invoice;
mod labels;

pub use inspection::*;
pub use invoice::*;
pub use labels::*;

/// The trimmed value, or the fallback when it is missing or blank
pub(crate) fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back() {
        assert_eq!(or_fallback(Some("  Acme "), "Not Specified"), "Acme");
        assert_eq!(or_fallback(Some(" "), "Not Specified"), "Not Specified");
        assert_eq!(or_fallback(None, "N/A"), "N/A");
    }
}
