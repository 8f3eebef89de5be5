use serde::Deserialize;
use std::fmt;
use tabled::Tabled;

/// One row of the per-call detail export.
///
/// The export reuses the summary's column names, so several fields carry
/// something other than what their header says: `Answered` holds the call
/// time, `Missed` the caller, `Abandoned` the agent or disposition, and
/// `AVG Handle Time` a free-text status narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetailRecord {
    #[serde(rename = "Queue")]
    pub queue: String,
    #[serde(rename = "Total Calls")]
    pub total_calls: String,
    #[serde(rename = "Answered")]
    pub answered: String,
    #[serde(rename = "Missed")]
    pub missed: String,
    /// Classification field: a raw disposition such as `NONE`, or one of the
    /// call-center sentinels after normalization.
    #[serde(rename = "Abandoned")]
    pub abandoned: String,
    /// Status text.
    #[serde(rename = "AVG Handle Time")]
    pub status: String,
    #[serde(rename = "AVG Waiting Time (Answered Calls)")]
    pub avg_wait_answered: String,
    #[serde(rename = "AVG Waiting Time (All Calls)")]
    pub avg_wait_all: String,
    #[serde(rename = "Average Talking Time")]
    pub avg_talking: String,
}

/// One row of the per-queue summary export, including the aggregate
/// `Total` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SummaryRecord {
    #[serde(rename = "Queue")]
    pub queue: String,
    #[serde(rename = "Total Calls")]
    pub total_calls: String,
    #[serde(rename = "Answered")]
    pub answered: String,
    #[serde(rename = "Missed")]
    pub missed: String,
    #[serde(rename = "Abandoned")]
    pub abandoned: String,
    #[serde(rename = "Answered Rate")]
    pub answered_rate: String,
    #[serde(rename = "Abandon Rate")]
    pub abandon_rate: String,
    #[serde(rename = "AVG Handle Time")]
    pub avg_handle_time: String,
    #[serde(rename = "AVG Waiting Time (Answered Calls)")]
    pub avg_wait_answered: String,
    #[serde(rename = "AVG Waiting Time (All Calls)")]
    pub avg_wait_all: String,
    #[serde(rename = "Max Waiting Time (All Calls)")]
    pub max_wait_all: String,
    #[serde(rename = "Average Talking Time")]
    pub avg_talking: String,
}

/// The two call-center lines that receive forwarded calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallCenterLine {
    Sara887,
    Sansa888,
}

impl CallCenterLine {
    /// Lines in precedence order: when both could match, 887 wins.
    pub const ALL: [CallCenterLine; 2] = [CallCenterLine::Sara887, CallCenterLine::Sansa888];

    pub fn extension(self) -> &'static str {
        match self {
            CallCenterLine::Sara887 => "887",
            CallCenterLine::Sansa888 => "888",
        }
    }

    /// Value written into the classification field by the normalizer.
    pub fn sentinel(self) -> &'static str {
        match self {
            CallCenterLine::Sara887 => "Call Center<887>",
            CallCenterLine::Sansa888 => "Call Center<888>",
        }
    }

    /// Queue label used in the summary report.
    pub fn label(self) -> &'static str {
        match self {
            CallCenterLine::Sara887 => "Call Center <887-Sara>",
            CallCenterLine::Sansa888 => "Call Center <888-Sansa>",
        }
    }

    pub fn from_sentinel(value: &str) -> Option<CallCenterLine> {
        Self::ALL.into_iter().find(|line| line.sentinel() == value)
    }
}

impl fmt::Display for CallCenterLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Answered calls credited to each call-center line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributionCounts {
    pub line_887: u64,
    pub line_888: u64,
}

impl AttributionCounts {
    pub fn get(&self, line: CallCenterLine) -> u64 {
        match line {
            CallCenterLine::Sara887 => self.line_887,
            CallCenterLine::Sansa888 => self.line_888,
        }
    }

    pub fn credit(&mut self, line: CallCenterLine) {
        match line {
            CallCenterLine::Sara887 => self.line_887 += 1,
            CallCenterLine::Sansa888 => self.line_888 += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.line_887 + self.line_888
    }
}

fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// One populated line of the summary report, columns 1 through 12.
/// Column 13 is reserved for manual entry and is never written.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "SL", display_with = "display_opt")]
    pub serial: Option<usize>,
    #[tabled(rename = "Queue")]
    pub queue: String,
    #[tabled(rename = "Total Calls")]
    pub total_calls: i64,
    #[tabled(rename = "Answered", display_with = "display_opt")]
    pub answered: Option<i64>,
    #[tabled(rename = "Missed+Abandoned", display_with = "display_opt")]
    pub missed_abandoned: Option<i64>,
    #[tabled(rename = "AVG Handle", display_with = "display_opt")]
    pub avg_handle_time: Option<String>,
    #[tabled(rename = "Wait (Answered)", display_with = "display_opt")]
    pub avg_wait_answered: Option<String>,
    #[tabled(rename = "Wait (All)", display_with = "display_opt")]
    pub avg_wait_all: Option<String>,
    #[tabled(rename = "Max Wait", display_with = "display_opt")]
    pub max_wait_all: Option<String>,
    #[tabled(rename = "Talking", display_with = "display_opt")]
    pub avg_talking: Option<String>,
    #[tabled(rename = "Answered Rate", display_with = "display_opt")]
    pub answered_rate: Option<String>,
    #[tabled(rename = "Abandon Rate", display_with = "display_opt")]
    pub abandon_rate: Option<String>,
}

/// One call in the cleaned detail report.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct DetailRow {
    #[tabled(rename = "Queue")]
    pub queue: String,
    #[tabled(rename = "Answered")]
    pub answered: String,
    #[tabled(rename = "Missed")]
    pub missed: String,
    #[tabled(rename = "Abandoned / Agent")]
    pub agent: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Ring Duration")]
    pub ring_duration: String,
    #[tabled(rename = "Answered Wait")]
    pub answered_wait: String,
    #[tabled(rename = "All Calls Wait")]
    pub all_calls_wait: String,
    #[tabled(rename = "Talking Time")]
    pub talking_time: String,
}

impl DetailRow {
    pub fn cells(&self) -> [&str; 9] {
        [
            &self.queue,
            &self.answered,
            &self.missed,
            &self.agent,
            &self.status,
            &self.ring_duration,
            &self.answered_wait,
            &self.all_calls_wait,
            &self.talking_time,
        ]
    }
}
