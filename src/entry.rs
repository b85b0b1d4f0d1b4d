use crate::grade;
use crate::records::{MarkEntry, MarkRecord, RecordError};
use crate::trend;

/// Derive grade and status for a submitted score against the current
/// snapshot. New entries get the next id after the largest one present.
pub fn enter_mark(snapshot: &[MarkRecord], entry: MarkEntry) -> Result<MarkRecord, RecordError> {
    let total = entry.assessment.total_marks;
    let grade = grade::classify(Some(entry.obtained_marks), Some(total));
    let status = trend::derive_trend(
        snapshot,
        entry.student.id,
        entry.subject.id,
        entry.obtained_marks,
        total,
        entry.id,
    );
    let id = match entry.id {
        Some(id) => id,
        None => next_id(snapshot)?,
    };

    Ok(MarkRecord {
        id,
        obtained_marks: entry.obtained_marks,
        assessment: entry.assessment,
        subject: entry.subject,
        student: entry.student,
        grade,
        status,
    })
}

fn next_id(snapshot: &[MarkRecord]) -> Result<i64, RecordError> {
    let max = snapshot.iter().map(|r| r.id).max().unwrap_or(0);
    max.checked_add(1).ok_or_else(|| {
        RecordError::new(
            "bad_record",
            format!("id space exhausted: no id after {}", max),
        )
    })
}

/// Replace the record with the same id, or append. Returns true on replace.
pub fn upsert(snapshot: &mut Vec<MarkRecord>, record: MarkRecord) -> bool {
    if let Some(slot) = snapshot.iter_mut().find(|r| r.id == record.id) {
        *slot = record;
        true
    } else {
        snapshot.push(record);
        false
    }
}
