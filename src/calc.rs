use crate::records::{GradeLabel, MarkRecord, StudentId, SubjectId, TrendLabel};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// `None` for a zero denominator, and for sums that overflowed to infinity.
fn ratio_percent(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        return None;
    }
    Some(part / whole * 100.0).filter(|v| v.is_finite())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStat {
    pub name: String,
    pub code: String,
    pub total_obtained: f64,
    pub total_max: f64,
    pub count: usize,
    pub pass_count: usize,
}

impl SubjectStat {
    /// `None` when every assessment in the group has a zero total.
    pub fn average_percentage(&self) -> Option<f64> {
        ratio_percent(self.total_obtained, self.total_max)
    }

    pub fn pass_rate(&self) -> Option<f64> {
        ratio_percent(self.pass_count as f64, self.count as f64)
    }
}

/// Fold records into per-subject totals keyed by subject id.
///
/// Grades are read from the records, not recomputed.
pub fn aggregate_by_subject(records: &[MarkRecord]) -> BTreeMap<SubjectId, SubjectStat> {
    let mut out: BTreeMap<SubjectId, SubjectStat> = BTreeMap::new();
    for r in records {
        let stat = out.entry(r.subject.id).or_insert_with(|| SubjectStat {
            name: r.subject.name.clone(),
            code: r.subject.code.clone(),
            total_obtained: 0.0,
            total_max: 0.0,
            count: 0,
            pass_count: 0,
        });
        stat.total_obtained += r.obtained_marks;
        stat.total_max += r.assessment.total_marks;
        stat.count += 1;
        if r.grade.is_pass() {
            stat.pass_count += 1;
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAverage {
    pub student_id: StudentId,
    pub name: String,
    pub obtained: f64,
    pub max: f64,
    pub percentage: Option<f64>,
}

/// Per-student totals pooled across subjects, in first-appearance order.
///
/// The percentage is taken from the final sums, not accumulated per record.
pub fn student_averages(records: &[MarkRecord]) -> Vec<StudentAverage> {
    let mut out: Vec<StudentAverage> = Vec::new();
    let mut index_by_id: HashMap<StudentId, usize> = HashMap::new();
    for r in records {
        let idx = *index_by_id.entry(r.student.id).or_insert_with(|| {
            out.push(StudentAverage {
                student_id: r.student.id,
                name: r.student.name.clone(),
                obtained: 0.0,
                max: 0.0,
                percentage: None,
            });
            out.len() - 1
        });
        out[idx].obtained += r.obtained_marks;
        out[idx].max += r.assessment.total_marks;
    }
    for s in &mut out {
        s.percentage = ratio_percent(s.obtained, s.max);
    }
    out
}

/// Highest pooled percentage first, at most `n` students.
///
/// The sort is stable, so equal percentages keep first-appearance order.
/// Students whose totals are all zero have no percentage and rank last.
pub fn top_performers(records: &[MarkRecord], n: usize) -> Vec<StudentAverage> {
    let mut ranked = student_averages(records);
    ranked.sort_by(|a, b| match (a.percentage, b.percentage) {
        (Some(a_pct), Some(b_pct)) => b_pct.partial_cmp(&a_pct).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub graded_count: usize,
    pub pass_rate: Option<f64>,
}

pub fn overall_summary(records: &[MarkRecord]) -> OverallSummary {
    let pass_count = records.iter().filter(|r| r.grade.is_pass()).count();
    OverallSummary {
        graded_count: records.len(),
        pass_rate: ratio_percent(pass_count as f64, records.len() as f64),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOverview {
    pub student_id: StudentId,
    pub current_grade: GradeLabel,
    pub overall_trend: TrendLabel,
    pub mark_count: usize,
}

/// The student's most recently created record (highest id) stands for the
/// current grade and trend.
pub fn student_overview(records: &[MarkRecord], student_id: StudentId) -> StudentOverview {
    let mine = records.iter().filter(|r| r.student.id == student_id);
    let mark_count = mine.clone().count();
    let latest = mine.max_by_key(|r| r.id);
    StudentOverview {
        student_id,
        current_grade: latest.map(|r| r.grade).unwrap_or_default(),
        overall_trend: latest.map(|r| r.status).unwrap_or_default(),
        mark_count,
    }
}
