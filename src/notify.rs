use crate::config::NoticeConfig;
use crate::records::{MarkRecord, TrendLabel};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    Email,
    Sms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Recipient {
    Student,
    Parent,
}

/// A message ready for whoever delivers email and SMS.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub channel: Channel,
    pub recipient: Recipient,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}

fn student_closing(trend: TrendLabel) -> &'static str {
    match trend {
        TrendLabel::Improved => {
            "Great job! Your performance has improved compared to the last assessment. Keep it up!\n"
        }
        TrendLabel::Declined => {
            "Your performance has slightly declined. We encourage you to focus more on this subject.\n"
        }
        _ => "Your performance is consistent. Try to push for an improvement in the next assessment!\n",
    }
}

fn parent_closing(trend: TrendLabel) -> &'static str {
    match trend {
        TrendLabel::Improved => "Your child's performance has improved. Keep encouraging them!\n",
        TrendLabel::Declined => {
            "There has been a slight decline in performance. A little extra focus might help.\n"
        }
        _ => "",
    }
}

/// Student email, parent email, parent SMS, in that order, each only when
/// the matching contact is on file. The parent email is skipped when it is
/// the student's own address.
pub fn compose_notices(record: &MarkRecord, cfg: &NoticeConfig) -> Vec<Notice> {
    if !cfg.enabled {
        return Vec::new();
    }

    let student = &record.student;
    let subject_name = &record.subject.name;
    let assessment_name = &record.assessment.name;
    let obtained = record.obtained_marks;
    let total = record.assessment.total_marks;
    let grade = record.grade.as_str();
    let trend = record.status.as_str();
    let title = format!("Performance Update: {} - {}", subject_name, assessment_name);

    let mut out = Vec::new();
    let student_email = non_empty(student.email.as_deref());

    if let Some(to) = student_email {
        let body = format!(
            "Dear {},\n\nYou have scored {:.1} / {:.1} in {} ({}).\nGrade: {}\nPerformance Trend: {}\n\n{}\nBest Regards,\n{}",
            student.name,
            obtained,
            total,
            assessment_name,
            subject_name,
            grade,
            trend,
            student_closing(record.status),
            cfg.signature
        );
        out.push(Notice {
            channel: Channel::Email,
            recipient: Recipient::Student,
            to: to.to_string(),
            subject: Some(title.clone()),
            body,
        });
    }

    if let Some(to) = non_empty(student.parents_email.as_deref()) {
        let same_as_student = student_email
            .map(|s| s.eq_ignore_ascii_case(to))
            .unwrap_or(false);
        if !same_as_student {
            let body = format!(
                "Dear Parent,\n\nThis is an update regarding your child {}'s performance.\n\nAssessment: {} ({})\nScore: {:.1} / {:.1}\nGrade: {}\nPerformance Trend: {}\n\n{}\nBest Regards,\n{}",
                student.name,
                assessment_name,
                subject_name,
                obtained,
                total,
                grade,
                trend,
                parent_closing(record.status),
                cfg.signature
            );
            out.push(Notice {
                channel: Channel::Email,
                recipient: Recipient::Parent,
                to: to.to_string(),
                subject: Some(title.clone()),
                body,
            });
        }
    }

    if let Some(to) = student
        .parents_mobile
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        out.push(Notice {
            channel: Channel::Sms,
            recipient: Recipient::Parent,
            to: to.to_string(),
            subject: None,
            body: format!(
                "Tracker Alert: {} scored {:.1}/{:.1} in {}. Grade: {}. Trend: {}.",
                student.name, obtained, total, assessment_name, grade, trend
            ),
        });
    }

    out
}
