//! Console styling for user-facing output.

use colored::*;

use crate::report::{LineKind, ReportLine};

/// Style of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Failures, in red
    Error,
    /// Successful outcomes, in green
    Success,
    /// Banners and headings, in yellow
    Alert,
}

impl MessageKind {
    fn emoji(self) -> &'static str {
        match self {
            MessageKind::Error => "❗",
            MessageKind::Success => "✅",
            MessageKind::Alert => "🚦",
        }
    }
}

/// Formats `text` with the emoji and color of `kind`.
pub fn styled(kind: MessageKind, text: &str) -> String {
    let line = format!("{} {}", kind.emoji(), text);
    match kind {
        MessageKind::Error => line.red().to_string(),
        MessageKind::Success => line.green().to_string(),
        MessageKind::Alert => line.yellow().to_string(),
    }
}

/// Start-of-program banner.
pub fn start_banner() -> String {
    styled(MessageKind::Alert, "Starting Program")
}

/// End-of-program banner.
pub fn end_banner() -> String {
    format!("{}", "🛑 End Program".yellow())
}

/// Styles one report line. Records are printed unstyled.
pub fn render(line: &ReportLine) -> String {
    match line.kind {
        LineKind::Error | LineKind::Failure => styled(MessageKind::Error, &line.text),
        LineKind::Heading => line.text.yellow().to_string(),
        LineKind::Record => line.text.clone(),
        LineKind::Success => styled(MessageKind::Success, &line.text),
    }
}
