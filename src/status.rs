//! One-pass interpretation of the free-text status field.
//!
//! The detail export stores a call's narrative ("Answered",
//! "Abandoned(Handled / Call Center(887) ...)") in its `AVG Handle Time`
//! column. Both the normalizer and the attribution counter need facts from
//! that text, so it is parsed once here and each stage reads the result.

use crate::types::CallCenterLine;
use once_cell::sync::Lazy;
use regex::Regex;

struct LinePatterns {
    line: CallCenterLine,
    /// `Handled / Call Center(NNN)`, any case.
    handled: Regex,
    /// `Abandoned(Handled / Call Center(NNN)`, exact case.
    abandoned_then_handled: Regex,
    /// Literal `Call Center(NNN)`, exact case.
    routed: String,
}

static LINE_PATTERNS: Lazy<Vec<LinePatterns>> = Lazy::new(|| {
    CallCenterLine::ALL
        .into_iter()
        .map(|line| {
            let ext = line.extension();
            LinePatterns {
                line,
                handled: Regex::new(&format!(r"(?i)Handled\s*/\s*Call Center\({ext}\)")).unwrap(),
                abandoned_then_handled: Regex::new(&format!(
                    r"Abandoned\(Handled\s*/\s*Call Center\({ext}\)"
                ))
                .unwrap(),
                routed: format!("Call Center({ext})"),
            }
        })
        .collect()
});

/// What the status text says happened to the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Answered,
    /// Abandoned in the queue, then picked up through a call-center line.
    AbandonedThenHandled(CallCenterLine),
    /// Abandoned with no call-center pickup.
    Abandoned,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedStatus {
    pub disposition: Disposition,
    /// Line named by a case-insensitive "Handled / Call Center(NNN)".
    pub handled_via: Option<CallCenterLine>,
    /// Line named by any exact "Call Center(NNN)" mention.
    pub routed_to: Option<CallCenterLine>,
}

impl ParsedStatus {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        let handled_via = first_line(|p| p.handled.is_match(text));
        let routed_to = first_line(|p| text.contains(p.routed.as_str()));

        let disposition = if text == "Answered" {
            Disposition::Answered
        } else if let Some(line) = first_line(|p| p.abandoned_then_handled.is_match(text)) {
            Disposition::AbandonedThenHandled(line)
        } else if text.starts_with("Abandoned") {
            Disposition::Abandoned
        } else {
            Disposition::Other
        };

        ParsedStatus {
            disposition,
            handled_via,
            routed_to,
        }
    }

    /// Whether the call reached a person and may be credited to a line.
    pub fn is_answered(&self) -> bool {
        matches!(
            self.disposition,
            Disposition::Answered | Disposition::AbandonedThenHandled(_)
        )
    }
}

fn first_line(pred: impl Fn(&LinePatterns) -> bool) -> Option<CallCenterLine> {
    LINE_PATTERNS.iter().find(|p| pred(p)).map(|p| p.line)
}
