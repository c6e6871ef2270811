//! Result rendering.
//!
//! Turns a [`BatchResult`] into the lines a user sees: every error first, then
//! the `Results:` heading, one line per resolved record, and a closing success
//! or failure line. Styling is left to the caller.

use crate::models::{BatchResult, ResolvedRecord};

/// Heading printed before the records.
pub const RESULTS_HEADING: &str = "Results:";
/// Closing line when at least one record resolved.
pub const RESOLVED_MESSAGE: &str = "IPs have been resolved!";
/// Closing line when nothing resolved.
pub const NOTHING_RESOLVED_MESSAGE: &str = "No IPs were resolved :(";

/// Role of a report line, used to pick its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A resolution error
    Error,
    /// The results heading
    Heading,
    /// One resolved record
    Record,
    /// Closing line of a batch with records
    Success,
    /// Closing line of a batch without records
    Failure,
}

/// One line of the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Role of the line
    pub kind: LineKind,
    /// Unstyled text
    pub text: String,
}

impl ReportLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Formats one record as
/// `<domain> MX Preference = <preference>, mail exchanger = <exchange> <ip>`.
///
/// # Examples
///
/// ```
/// use mx_resolve::{format_record, ResolvedRecord};
///
/// let record = ResolvedRecord {
///     domain: "aol.com".to_string(),
///     preference: 10,
///     exchange: "mx-aol.mail.gm0.yahoodns.net".to_string(),
///     ip: "67.195.204.72".parse().unwrap(),
/// };
/// assert_eq!(
///     format_record(&record),
///     "aol.com MX Preference = 10, mail exchanger = mx-aol.mail.gm0.yahoodns.net 67.195.204.72"
/// );
/// ```
pub fn format_record(record: &ResolvedRecord) -> String {
    format!(
        "{} MX Preference = {}, mail exchanger = {} {}",
        record.domain, record.preference, record.exchange, record.ip
    )
}

/// Builds the report for a finished batch.
pub fn summarize(result: &BatchResult) -> Vec<ReportLine> {
    let mut lines = Vec::with_capacity(result.errors.len() + result.records.len() + 2);

    lines.extend(
        result
            .errors
            .iter()
            .map(|error| ReportLine::new(LineKind::Error, error.to_string())),
    );
    lines.push(ReportLine::new(LineKind::Heading, RESULTS_HEADING));
    lines.extend(
        result
            .records
            .iter()
            .map(|record| ReportLine::new(LineKind::Record, format_record(record))),
    );

    if result.is_resolved() {
        lines.push(ReportLine::new(LineKind::Success, RESOLVED_MESSAGE));
    } else {
        lines.push(ReportLine::new(LineKind::Failure, NOTHING_RESOLVED_MESSAGE));
    }
    lines
}
