//! Formatting of the values that appear in reports, and of output filenames.

use crate::model::ReportKind;
use chrono::{DateTime, Local, NaiveDate};

/// Format an amount with exactly two decimals, prefixed with its currency code.
/// The binary value of the amount is rounded half away from zero, so `38.746`
/// becomes `38.75` (`38.745` is stored just below the half and becomes `38.74`).
///
/// ```
/// use report_pdf::format_currency;
///
/// assert_eq!(format_currency(1200.0, "OMR"), "OMR 1200.00");
/// assert_eq!(format_currency(38.746, "OMR"), "OMR 38.75");
/// ```
pub fn format_currency(amount: f64, code: &str) -> String {
    let mut rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // no "-0.00"
        rounded = 0.0;
    }
    format!("{code} {rounded:.2}")
}

/// Parse a `YYYY-MM-DD` or RFC 3339 date. A date-time without an offset is
/// accepted too; only its date part is used.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|d| d.date_naive())
        })
        .or_else(|| {
            date.get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        })
}

/// Long form of an ISO date, e.g. `"January 15, 2024"`. Blank input reads
/// `"N/A"`; anything that isn't a date is returned as it was given.
pub fn format_date(date: &str) -> String {
    if date.trim().is_empty() {
        return "N/A".to_string();
    }
    match parse_date(date) {
        Some(parsed) => parsed.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Strip everything but ASCII letters and digits from a client name
pub fn sanitize_client_name(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// The filename a rendered report is saved under:
/// `<ReportKind>_<SanitizedClientName>_<ISODate>.pdf`.
///
/// A client name with nothing left after sanitizing becomes `NotSpecified`, and a
/// missing or unparseable date becomes today's date.
pub fn report_filename(kind: ReportKind, client_name: Option<&str>, date: Option<&str>) -> String {
    let client = client_name
        .map(sanitize_client_name)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "NotSpecified".to_string());
    let date = date
        .and_then(parse_date)
        .unwrap_or_else(|| Local::now().date_naive());
    format!(
        "{}_{}_{}.pdf",
        kind.filename_prefix(),
        client,
        date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_currency(1200.0, "OMR"), "OMR 1200.00");
        assert_eq!(format_currency(38.746, "OMR"), "OMR 38.75");
        assert_eq!(format_currency(0.5, "USD"), "USD 0.50");
        assert_eq!(format_currency(-12.345678, "OMR"), "OMR -12.35");
        assert_eq!(format_currency(-0.001, "OMR"), "OMR 0.00");
    }

    #[test]
    fn rounding_follows_the_stored_value() {
        // 38.745 is stored as 38.74499...
        assert_eq!(format_currency(38.745, "OMR"), "OMR 38.74");
        assert_eq!(format_currency(2.675, "OMR"), "OMR 2.67");
        assert_eq!(format_currency(0.125, "OMR"), "OMR 0.13");
    }

    #[test]
    fn dates_in_long_form() {
        assert_eq!(format_date("2024-01-15"), "January 15, 2024");
        assert_eq!(format_date("2024-03-05T10:30:00Z"), "March 5, 2024");
        assert_eq!(format_date("2024-12-01T08:00:00"), "December 1, 2024");
        assert_eq!(format_date("  "), "N/A");
        assert_eq!(format_date("next tuesday"), "next tuesday");
    }

    #[test]
    fn client_names_are_sanitized() {
        assert_eq!(sanitize_client_name("Al-Harthy & Sons, LLC"), "AlHarthySonsLLC");
        assert_eq!(sanitize_client_name("شركة"), "");
    }

    #[test]
    fn filenames() {
        assert_eq!(
            report_filename(ReportKind::Inspection, Some("John O'Neil"), Some("2024-01-15")),
            "Inspection_Report_JohnONeil_2024-01-15.pdf"
        );
        assert_eq!(
            report_filename(ReportKind::Invoice, Some("!!!"), Some("2024-02-29T12:00:00+04:00")),
            "Invoice_NotSpecified_2024-02-29.pdf"
        );
        let today = report_filename(ReportKind::Invoice, None, None);
        assert!(today.starts_with("Invoice_NotSpecified_20"));
        assert!(today.ends_with(".pdf"));
    }
}
