use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::error::{ErrorCode, OrderdeskError};
use crate::models::Product;
use crate::services::{products, reports};

use super::AppState;

impl IntoResponse for OrderdeskError {
    fn into_response(self) -> Response {
        let status = match self.code {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(code = self.code.as_str(), message = %self.message, "request failed");
        }
        (status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn blocked_assets_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<reports::BlockedAssets>, OrderdeskError> {
    let conn = state.conn()?;
    reports::blocked_assets(&conn).map(Json)
}

pub async fn customer_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<reports::CustomerReportParams>,
) -> Result<Json<reports::CustomerReport>, OrderdeskError> {
    let conn = state.conn()?;
    reports::customer_report(&conn, &params).map(Json)
}

pub async fn product_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<reports::ProductReport>, OrderdeskError> {
    let conn = state.conn()?;
    reports::product_report(&conn).map(Json)
}

pub async fn save_product(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Product>, OrderdeskError> {
    let mut conn = state.conn()?;
    products::save_product(&mut conn, body).map(Json)
}
