use crate::normalize::NormalizedRecord;
use crate::types::{AttributionCounts, CallCenterLine};
use tracing::debug;

/// Tally answered calls per call-center line over normalized records.
///
/// A record is credited only when its status shows it was answered. The
/// line comes from the normalizer's sentinel or, failing that, from a
/// `Call Center(NNN)` mention in the status text; 887 is checked first.
pub fn count_attributions(records: &[NormalizedRecord]) -> AttributionCounts {
    let mut counts = AttributionCounts::default();
    for record in records {
        if let Some(line) = attributed_line(record) {
            counts.credit(line);
        }
    }
    debug!(line_887 = counts.line_887, line_888 = counts.line_888, "calls attributed");
    counts
}

pub fn attributed_line(normalized: &NormalizedRecord) -> Option<CallCenterLine> {
    let status = &normalized.status;
    if !status.is_answered() {
        return None;
    }
    let agent = CallCenterLine::from_sentinel(normalized.record.abandoned.trim());
    CallCenterLine::ALL
        .into_iter()
        .find(|line| agent == Some(*line) || status.routed_to == Some(*line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize_detail_records, normalize_record};
    use crate::types::DetailRecord;

    fn record(abandoned: &str, status: &str) -> DetailRecord {
        DetailRecord {
            abandoned: abandoned.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn normalized(abandoned: &str, status: &str) -> NormalizedRecord {
        normalize_record(record(abandoned, status))
    }

    #[test]
    fn sentinel_and_pickup_status_are_credited() {
        let records = normalize_detail_records(vec![
            record("NONE", "Abandoned(Handled / Call Center(887) 00:12)"),
            record("NONE", "Abandoned(Handled / Call Center(888) 00:40)"),
            record("NONE", "Abandoned(Handled / Call Center(888) 00:05)"),
        ]);
        let counts = count_attributions(&records);
        assert_eq!(counts, AttributionCounts { line_887: 1, line_888: 2 });
    }

    #[test]
    fn answered_call_with_sentinel_agent_is_credited() {
        let counts = count_attributions(&[normalized("Call Center<888>", "Answered")]);
        assert_eq!(counts.line_888, 1);
        assert_eq!(counts.line_887, 0);
    }

    #[test]
    fn unanswered_calls_get_no_credit() {
        let counts = count_attributions(&[
            normalized("Call Center<887>", "Abandoned(Ring 00:30)"),
            normalized("NONE", "Missed via Call Center(888)"),
        ]);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn plain_answered_calls_without_line_are_ignored() {
        assert_eq!(attributed_line(&normalized("Agent 4", "Answered")), None);
    }

    #[test]
    fn each_record_credits_at_most_one_line() {
        let r = normalized("Call Center<888>", "Abandoned(Handled / Call Center(887))");
        assert_eq!(attributed_line(&r), Some(CallCenterLine::Sara887));
        let counts = count_attributions(&[r]);
        assert_eq!(counts.total(), 1);
    }
}
