use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type MarkId = i64;
pub type SubjectId = i64;
pub type StudentId = i64;
pub type AssessmentId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GradeLabel {
    A,
    B,
    C,
    D,
    Fail,
    /// Score or denominator not entered yet.
    #[default]
    #[serde(rename = "-")]
    NotGradable,
}

impl GradeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            GradeLabel::A => "A",
            GradeLabel::B => "B",
            GradeLabel::C => "C",
            GradeLabel::D => "D",
            GradeLabel::Fail => "Fail",
            GradeLabel::NotGradable => "-",
        }
    }

    /// Pass rates count every record not explicitly graded `Fail`.
    pub fn is_pass(self) -> bool {
        self != GradeLabel::Fail
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrendLabel {
    Improved,
    Declined,
    #[serde(alias = "Same")]
    Stable,
    /// No earlier record to compare with.
    #[default]
    #[serde(rename = "-", alias = "New")]
    NoBaseline,
}

impl TrendLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendLabel::Improved => "Improved",
            TrendLabel::Declined => "Declined",
            TrendLabel::Stable => "Stable",
            TrendLabel::NoBaseline => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRef {
    pub id: AssessmentId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub total_marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    pub id: SubjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id: StudentId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents_mobile: Option<String>,
}

/// One scored assessment attempt by one student in one subject.
///
/// `grade` and `status` are derived when the mark is saved and travel with
/// the record; aggregate views read them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkRecord {
    pub id: MarkId,
    pub obtained_marks: f64,
    pub assessment: AssessmentRef,
    pub subject: SubjectRef,
    pub student: StudentRef,
    #[serde(default)]
    pub grade: GradeLabel,
    #[serde(default)]
    pub status: TrendLabel,
}

impl MarkRecord {
    pub fn percentage(&self) -> Option<f64> {
        crate::grade::percentage(Some(self.obtained_marks), Some(self.assessment.total_marks))
    }
}

/// A score as submitted from the entry form, before grade and status exist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkEntry {
    #[serde(default)]
    pub id: Option<MarkId>,
    pub obtained_marks: f64,
    pub assessment: AssessmentRef,
    pub subject: SubjectRef,
    pub student: StudentRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RecordError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn at_index(mut self, index: usize) -> Self {
        self.details = Some(json!({ "index": index }));
        self
    }
}

fn check_scores(obtained: f64, total: f64) -> Result<(), RecordError> {
    if !obtained.is_finite() || obtained < 0.0 {
        return Err(RecordError::new(
            "bad_record",
            format!("obtainedMarks must be a non-negative number, got {}", obtained),
        ));
    }
    if !total.is_finite() || total < 0.0 {
        return Err(RecordError::new(
            "bad_record",
            format!("assessment.totalMarks must be a non-negative number, got {}", total),
        ));
    }
    Ok(())
}

/// Zero totals pass; aggregates surface them as undefined percentages.
pub fn validate_record(record: &MarkRecord) -> Result<(), RecordError> {
    check_scores(record.obtained_marks, record.assessment.total_marks)
}

pub fn validate_entry(entry: &MarkEntry) -> Result<(), RecordError> {
    check_scores(entry.obtained_marks, entry.assessment.total_marks)
}

pub fn parse_records(raw: Option<&serde_json::Value>) -> Result<Vec<MarkRecord>, RecordError> {
    let Some(raw) = raw else {
        return Err(RecordError::new("bad_params", "missing records"));
    };
    let Some(items) = raw.as_array() else {
        return Err(RecordError::new("bad_params", "records must be an array"));
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let record: MarkRecord = serde_json::from_value(item.clone())
            .map_err(|e| RecordError::new("bad_params", e.to_string()).at_index(index))?;
        validate_record(&record).map_err(|e| e.at_index(index))?;
        out.push(record);
    }
    Ok(out)
}

pub fn parse_entry(raw: Option<&serde_json::Value>) -> Result<MarkEntry, RecordError> {
    let Some(raw) = raw else {
        return Err(RecordError::new("bad_params", "missing mark"));
    };
    let entry: MarkEntry = serde_json::from_value(raw.clone())
        .map_err(|e| RecordError::new("bad_params", e.to_string()))?;
    validate_entry(&entry)?;
    Ok(entry)
}
