use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_count, required_i64, resolve_records};
use crate::ipc::types::{AppState, Request};
use crate::records::{MarkRecord, SubjectId};
use serde_json::json;
use std::collections::BTreeMap;

fn subject_rows(stats: &BTreeMap<SubjectId, calc::SubjectStat>) -> Vec<serde_json::Value> {
    stats
        .iter()
        .map(|(subject_id, s)| {
            json!({
                "subjectId": subject_id,
                "name": s.name,
                "code": s.code,
                "totalObtained": s.total_obtained,
                "totalMax": s.total_max,
                "count": s.count,
                "passCount": s.pass_count,
                "averagePercentage": s.average_percentage(),
                "passRate": s.pass_rate(),
            })
        })
        .collect()
}

fn handle_reports_subjects(state: &mut AppState, req: &Request) -> serde_json::Value {
    let records = match resolve_records(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let stats = calc::aggregate_by_subject(&records);
    ok(&req.id, json!({ "subjects": subject_rows(&stats) }))
}

fn handle_reports_top_performers(state: &mut AppState, req: &Request) -> serde_json::Value {
    let n = match optional_count(req, "n", state.config.top_performers) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let records = match resolve_records(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(
        &req.id,
        json!({ "topPerformers": calc::top_performers(&records, n) }),
    )
}

/// Everything the faculty reports tab shows in one round trip.
fn handle_reports_faculty(state: &mut AppState, req: &Request) -> serde_json::Value {
    let n = match optional_count(req, "n", state.config.top_performers) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let records = match resolve_records(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let stats = calc::aggregate_by_subject(&records);
    ok(
        &req.id,
        json!({
            "subjects": subject_rows(&stats),
            "topPerformers": calc::top_performers(&records, n),
            "summary": calc::overall_summary(&records),
        }),
    )
}

fn handle_reports_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let records = match resolve_records(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let overview = calc::student_overview(&records, student_id);
    let mut marks: Vec<&MarkRecord> = records
        .iter()
        .filter(|r| r.student.id == student_id)
        .collect();
    marks.sort_by(|a, b| b.id.cmp(&a.id));

    ok(
        &req.id,
        json!({
            "overview": overview,
            "marks": marks,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.subjects" => Some(handle_reports_subjects(state, req)),
        "reports.topPerformers" => Some(handle_reports_top_performers(state, req)),
        "reports.faculty" => Some(handle_reports_faculty(state, req)),
        "reports.student" => Some(handle_reports_student(state, req)),
        _ => None,
    }
}
