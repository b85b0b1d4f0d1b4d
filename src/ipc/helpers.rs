use crate::ipc::error::{err, record_err};
use crate::ipc::types::{AppState, Request};
use crate::records::{self, MarkRecord};
use std::borrow::Cow;

pub fn required_i64(req: &Request, key: &str) -> Result<i64, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn optional_i64(req: &Request, key: &str) -> Result<Option<i64>, serde_json::Value> {
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            err(
                &req.id,
                "bad_params",
                format!("{} must be an integer", key),
                None,
            )
        }),
    }
}

/// Non-negative count, falling back to `default` when absent.
pub fn optional_count(req: &Request, key: &str, default: usize) -> Result<usize, serde_json::Value> {
    match req.params.get(key) {
        None => Ok(default),
        Some(v) if v.is_null() => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                err(
                    &req.id,
                    "bad_params",
                    format!("{} must be a non-negative integer", key),
                    None,
                )
            }),
    }
}

/// A score as typed into the entry form: number, numeric string, or
/// nothing yet (absent, null, blank string).
pub fn optional_score(req: &Request, key: &str) -> Result<Option<f64>, serde_json::Value> {
    let bad = || {
        err(
            &req.id,
            "bad_params",
            format!("{} must be a number", key),
            None,
        )
    };
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) if v.is_number() => v.as_f64().map(Some).ok_or_else(bad),
        Some(v) => {
            let Some(s) = v.as_str() else {
                return Err(bad());
            };
            let t = s.trim();
            if t.is_empty() {
                return Ok(None);
            }
            t.parse::<f64>().map(Some).map_err(|_| bad())
        }
    }
}

/// Records passed inline in `params.records`, else the loaded snapshot.
pub fn resolve_records<'a>(
    state: &'a AppState,
    req: &Request,
) -> Result<Cow<'a, [MarkRecord]>, serde_json::Value> {
    match req.params.get("records") {
        None => Ok(Cow::Borrowed(state.snapshot.as_slice())),
        Some(v) if v.is_null() => Ok(Cow::Borrowed(state.snapshot.as_slice())),
        Some(v) => records::parse_records(Some(v))
            .map(Cow::Owned)
            .map_err(|e| record_err(&req.id, e)),
    }
}
