use crate::types::{DetailRecord, DetailRow};
use tracing::debug;

pub const DETAIL_SHEET_NAME: &str = "Call Center Details";

pub const DETAIL_HEADERS: [&str; 9] = [
    "Queue",
    "Answered",
    "Missed",
    "Abandoned / Agent",
    "Status",
    "Ring Duration",
    "Answered Wait",
    "All Calls Wait",
    "Talking Time",
];

pub const DETAIL_COLUMN_WIDTHS: [f64; 9] = [18.0, 22.0, 14.0, 24.0, 32.0, 14.0, 14.0, 14.0, 16.0];

/// The export repeats its own column captions inside each queue section.
fn is_embedded_header(record: &DetailRecord) -> bool {
    record.total_calls == "ID" || record.answered == "Time" || record.missed == "Call From"
}

/// Flatten the sectioned detail export into one row per call.
///
/// A record with a queue name opens a new section and emits nothing; the
/// calls that follow inherit that queue.
pub fn project_details<'a>(records: impl IntoIterator<Item = &'a DetailRecord>) -> Vec<DetailRow> {
    let mut current_queue: Option<&str> = None;
    let mut rows = Vec::new();
    let mut sections = 0usize;

    for record in records {
        let queue = record.queue.trim();
        if !queue.is_empty() {
            current_queue = Some(queue);
            sections += 1;
            continue;
        }
        if is_embedded_header(record) || record.answered.trim().is_empty() {
            continue;
        }
        rows.push(DetailRow {
            queue: current_queue.unwrap_or_default().to_string(),
            answered: record.answered.clone(),
            missed: record.missed.clone(),
            agent: record.abandoned.clone(),
            status: record.status.clone(),
            // The export has no separate ring column; both take the
            // answered-call wait.
            ring_duration: record.avg_wait_answered.clone(),
            answered_wait: record.avg_wait_answered.clone(),
            all_calls_wait: record.avg_wait_all.clone(),
            talking_time: record.avg_talking.clone(),
        });
    }

    debug!(sections, calls = rows.len(), "detail rows projected");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(queue: &str) -> DetailRecord {
        DetailRecord {
            queue: queue.to_string(),
            ..Default::default()
        }
    }

    fn call(answered: &str, caller: &str) -> DetailRecord {
        DetailRecord {
            answered: answered.to_string(),
            missed: caller.to_string(),
            abandoned: "Call Center<887>".to_string(),
            status: "Abandoned(Handled / Call Center(887))".to_string(),
            avg_wait_answered: "00:00:12".to_string(),
            avg_wait_all: "00:00:20".to_string(),
            avg_talking: "00:03:05".to_string(),
            ..Default::default()
        }
    }

    fn caption_row() -> DetailRecord {
        DetailRecord {
            total_calls: "ID".to_string(),
            answered: "Time".to_string(),
            missed: "Call From".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn calls_inherit_the_latest_section_queue() {
        let records = vec![
            call("01/03/2024 08:00", "100"),
            section("Main"),
            caption_row(),
            call("01/03/2024 08:05", "101"),
            section(" Branch B "),
            call("01/03/2024 09:00", "102"),
            call("01/03/2024 09:10", "103"),
        ];
        let rows = project_details(&records);
        let queues: Vec<&str> = rows.iter().map(|r| r.queue.as_str()).collect();
        assert_eq!(queues, ["", "Main", "Branch B", "Branch B"]);
    }

    #[test]
    fn blank_answered_and_captions_are_skipped() {
        let mut partial_caption = call("Time", "555");
        partial_caption.total_calls = "7".to_string();
        let records = vec![section("Main"), call("", "100"), call("  ", "101"), partial_caption];
        assert!(project_details(&records).is_empty());
    }

    #[test]
    fn row_carries_all_nine_columns() {
        let rows = project_details(&[section("Main"), call("01/03/2024 08:05", "0123")]);
        assert_eq!(
            rows[0].cells(),
            [
                "Main",
                "01/03/2024 08:05",
                "0123",
                "Call Center<887>",
                "Abandoned(Handled / Call Center(887))",
                "00:00:12",
                "00:00:12",
                "00:00:20",
                "00:03:05",
            ]
        );
        assert_eq!(rows[0].cells().len(), DETAIL_HEADERS.len());
    }
}
