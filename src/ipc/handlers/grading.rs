use crate::entry;
use crate::grade;
use crate::ipc::error::{ok, record_err};
use crate::ipc::helpers::optional_score;
use crate::ipc::types::{AppState, Request};
use crate::notify;
use crate::records;
use serde_json::json;

/// Live grade shown next to the score box before the mark is saved.
fn handle_grade_preview(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let obtained = match optional_score(req, "obtained") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let total = match optional_score(req, "total") {
        Ok(v) => v,
        Err(e) => return e,
    };

    ok(
        &req.id,
        json!({
            "grade": grade::classify(obtained, total),
            "percentage": grade::percentage(obtained, total),
        }),
    )
}

fn handle_marks_enter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let mark_entry = match records::parse_entry(req.params.get("mark")) {
        Ok(v) => v,
        Err(e) => return record_err(&req.id, e),
    };

    let saved = match entry::enter_mark(&state.snapshot, mark_entry) {
        Ok(v) => v,
        Err(e) => return record_err(&req.id, e),
    };
    let notices = notify::compose_notices(&saved, &state.config.notices);
    let replaced = entry::upsert(&mut state.snapshot, saved.clone());
    tracing::info!(
        mark_id = saved.id,
        student_id = saved.student.id,
        subject_id = saved.subject.id,
        grade = saved.grade.as_str(),
        status = saved.status.as_str(),
        replaced,
        "mark saved"
    );

    ok(
        &req.id,
        json!({
            "mark": saved,
            "replaced": replaced,
            "notices": notices,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grade.preview" => Some(handle_grade_preview(state, req)),
        "marks.enter" => Some(handle_marks_enter(state, req)),
        _ => None,
    }
}
