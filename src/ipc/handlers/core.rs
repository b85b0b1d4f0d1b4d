use crate::ipc::error::{ok, record_err};
use crate::ipc::helpers::optional_i64;
use crate::ipc::types::{AppState, Request};
use crate::records;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "recordCount": state.snapshot.len(),
            "config": state.config,
        }),
    )
}

fn handle_records_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let loaded = match records::parse_records(req.params.get("records")) {
        Ok(v) => v,
        Err(e) => return record_err(&req.id, e),
    };
    tracing::info!(count = loaded.len(), "snapshot replaced");
    state.snapshot = loaded;
    ok(&req.id, json!({ "count": state.snapshot.len() }))
}

fn handle_records_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match optional_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject_id = match optional_i64(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let rows = state
        .snapshot
        .iter()
        .filter(|r| student_id.map(|id| r.student.id == id).unwrap_or(true))
        .filter(|r| subject_id.map(|id| r.subject.id == id).unwrap_or(true))
        .collect::<Vec<_>>();
    ok(&req.id, json!({ "records": rows }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "records.load" => Some(handle_records_load(state, req)),
        "records.list" => Some(handle_records_list(state, req)),
        _ => None,
    }
}
