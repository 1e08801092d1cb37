//! API route definitions.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use super::error::ApiError;
use super::page::DashboardPage;
use super::query::TableQuery;
use super::state::AppState;
use crate::analysis::{bar_chart, pie_chart, Summary};
use crate::table::Column;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/summary", get(summary))
        .route("/charts/signatures", get(signature_chart))
        .route("/charts/severity", get(severity_chart))
        .route("/alerts", get(list_alerts))
}

fn meta() -> Value {
    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "records": state.alerts.len()
        },
        "meta": meta()
    }))
}

async fn summary(State(state): State<AppState>) -> Json<Value> {
    let summary = Summary::from_records(state.alerts.records());
    Json(json!({ "data": summary, "meta": meta() }))
}

async fn signature_chart(State(state): State<AppState>) -> Json<Value> {
    let summary = Summary::from_records(state.alerts.records());
    Json(json!({ "data": bar_chart(&summary.signatures), "meta": meta() }))
}

async fn severity_chart(State(state): State<AppState>) -> Json<Value> {
    let summary = Summary::from_records(state.alerts.records());
    Json(json!({ "data": pie_chart(&summary.severities), "meta": meta() }))
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Json<Value>, ApiError> {
    let view = query.to_view(state.default_sort)?;
    let records = view.select(state.alerts.records());
    let rows: Vec<_> = records
        .iter()
        .map(|r| crate::table::DisplayRow::from_record(r))
        .collect();
    let columns: Vec<Value> = Column::ALL
        .iter()
        .map(|c| json!({ "key": c.accessor(), "header": c.header() }))
        .collect();
    let (sort, order) = match view.sort.current() {
        Some((column, direction)) => (Some(column.accessor()), Some(direction.to_string())),
        None => (None, None),
    };

    Ok(Json(json!({
        "data": {
            "columns": columns,
            "rows": rows,
            "records": records,
        },
        "meta": {
            "total": state.alerts.len(),
            "matched": records.len(),
            "sort": sort,
            "order": order,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }
    })))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Html<String>, ApiError> {
    let view = query.to_view(state.default_sort)?;
    let summary = Summary::from_records(state.alerts.records());
    let rows = view.rows(state.alerts.records());
    let page = DashboardPage::build(&summary, &view, &query, rows);
    Ok(Html(page.render()?))
}
