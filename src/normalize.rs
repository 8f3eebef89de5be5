use crate::status::ParsedStatus;
use crate::types::DetailRecord;
use tracing::debug;

/// A detail record after normalization, with its status text already
/// interpreted for the stages that follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub record: DetailRecord,
    pub status: ParsedStatus,
}

/// Rewrite the classification of unlabeled calls that the status text
/// shows were handled through a call-center line.
///
/// Output is one-to-one with the input and in the same order. Only records
/// whose classification is `NONE` (any case) are candidates; everything
/// else passes through untouched, so normalizing twice changes nothing.
pub fn normalize_detail_records(records: Vec<DetailRecord>) -> Vec<NormalizedRecord> {
    let mut rewritten = 0usize;
    let out: Vec<NormalizedRecord> = records
        .into_iter()
        .map(|record| {
            let before_none = is_unlabelled(&record);
            let normalized = normalize_record(record);
            if before_none && !is_unlabelled(&normalized.record) {
                rewritten += 1;
            }
            normalized
        })
        .collect();
    debug!(records = out.len(), rewritten, "detail records normalized");
    out
}

fn is_unlabelled(record: &DetailRecord) -> bool {
    record.abandoned.trim().eq_ignore_ascii_case("NONE")
}

pub fn normalize_record(record: DetailRecord) -> NormalizedRecord {
    let status = ParsedStatus::parse(&record.status);
    let record = match status.handled_via {
        Some(line) if is_unlabelled(&record) => DetailRecord {
            abandoned: line.sentinel().to_string(),
            ..record
        },
        _ => record,
    };
    NormalizedRecord { record, status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Disposition;

    fn record(abandoned: &str, status: &str) -> DetailRecord {
        DetailRecord {
            answered: "01/03/2024 09:15".to_string(),
            abandoned: abandoned.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn none_with_887_pickup_is_relabelled() {
        let out = normalize_record(record("NONE", "Abandoned(Handled / Call Center(887) 00:10)"));
        assert_eq!(out.record.abandoned, "Call Center<887>");
        assert_eq!(out.record.status, "Abandoned(Handled / Call Center(887) 00:10)");
    }

    #[test]
    fn parsed_status_travels_with_the_record() {
        let out = normalize_record(record("NONE", "Abandoned(Handled / Call Center(888) 00:10)"));
        assert!(out.status.is_answered());
        assert!(matches!(out.status.disposition, Disposition::AbandonedThenHandled(_)));
    }

    #[test]
    fn classification_match_is_case_insensitive() {
        let out = normalize_record(record(" none ", "handled/CALL CENTER(888)"));
        assert_eq!(out.record.abandoned, "Call Center<888>");
    }

    #[test]
    fn labelled_records_pass_through() {
        let input = record("Agent 12", "Abandoned(Handled / Call Center(887))");
        assert_eq!(normalize_record(input.clone()).record, input);
    }

    #[test]
    fn none_without_pickup_passes_through() {
        let input = record("NONE", "Abandoned(Ring 00:30)");
        assert_eq!(normalize_record(input.clone()).record, input);
    }

    #[test]
    fn normalizing_is_idempotent_and_order_preserving() {
        let input = vec![
            record("NONE", "Handled / Call Center(888)"),
            record("NONE", "Answered"),
            record("NONE", "Handled / Call Center(887)"),
        ];
        let once = normalize_detail_records(input);
        let again: Vec<DetailRecord> = once.iter().map(|n| n.record.clone()).collect();
        let twice = normalize_detail_records(again);
        assert_eq!(once, twice);
        let labels: Vec<&str> = once.iter().map(|n| n.record.abandoned.as_str()).collect();
        assert_eq!(labels, ["Call Center<888>", "NONE", "Call Center<887>"]);
    }
}
