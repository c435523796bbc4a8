use axum::extract::rejection::BytesRejection;
use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::models::{parse_body, ListQuery, MetricRequest};
use crate::api::AppState;
use crate::errors::VoiceError;

fn metric_value(value: Option<&Value>) -> Result<f64, VoiceError> {
    match value {
        None | Some(Value::Null) => Ok(1.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| VoiceError::invalid("Invalid value")),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| VoiceError::invalid("Invalid value")),
        Some(_) => Err(VoiceError::invalid("Invalid value")),
    }
}

pub async fn record_metric(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, VoiceError> {
    let body = body?;
    let req: MetricRequest = parse_body(&body, "Missing name")?;
    let name = req.name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| VoiceError::invalid("Missing name"))?;
    let value = metric_value(req.value.as_ref())?;
    let metadata = req.metadata.filter(|m| !m.is_null()).map(|m| m.to_string());

    let rec = state.db.insert_metric(&name, value, metadata.as_deref())?;
    Ok(Json(json!({ "ok": true, "rec": rec })))
}

pub async fn list_metrics(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, VoiceError> {
    let limit = query.limit.unwrap_or(50).min(500);
    let offset = query.offset.unwrap_or(0);

    let metrics = state.db.list_metrics(limit, offset)?;
    let total = state.db.count_metrics()?;
    Ok(Json(json!({ "metrics": metrics, "total": total })))
}
