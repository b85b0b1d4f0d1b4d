use crate::grade;
use crate::records::{MarkId, MarkRecord, StudentId, SubjectId, TrendLabel};
use std::cmp::Ordering;

/// The record a new score in (student, subject) is compared against:
/// latest assessment date, then highest assessment id. Undated
/// assessments count as older than any dated one.
pub fn baseline<'a>(
    history: &'a [MarkRecord],
    student_id: StudentId,
    subject_id: SubjectId,
    current_mark_id: Option<MarkId>,
) -> Option<&'a MarkRecord> {
    history
        .iter()
        .filter(|r| r.student.id == student_id && r.subject.id == subject_id)
        .filter(|r| current_mark_id != Some(r.id))
        .max_by(|a, b| {
            a.assessment
                .date
                .cmp(&b.assessment.date)
                .then_with(|| a.assessment.id.cmp(&b.assessment.id))
        })
}

/// Compare a score with the student's previous one in the same subject.
///
/// `current_mark_id` is the id being re-saved, if any; it never serves as
/// its own baseline.
pub fn derive_trend(
    history: &[MarkRecord],
    student_id: StudentId,
    subject_id: SubjectId,
    obtained: f64,
    total: f64,
    current_mark_id: Option<MarkId>,
) -> TrendLabel {
    let Some(last) = baseline(history, student_id, subject_id, current_mark_id) else {
        return TrendLabel::NoBaseline;
    };
    let current_pct = grade::percentage(Some(obtained), Some(total));
    let (Some(current_pct), Some(last_pct)) = (current_pct, last.percentage()) else {
        return TrendLabel::NoBaseline;
    };
    match current_pct.partial_cmp(&last_pct) {
        Some(Ordering::Greater) => TrendLabel::Improved,
        Some(Ordering::Less) => TrendLabel::Declined,
        _ => TrendLabel::Stable,
    }
}
