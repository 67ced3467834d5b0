//! HTTP surface. One shared SQLite connection behind a mutex: requests are
//! processed synchronously, one service call at a time, matching the
//! single-writer model of the store.

pub mod routes;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use rusqlite::Connection;
use tracing::info;

use crate::error::OrderdeskError;

pub struct AppState {
    conn: Mutex<Connection>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, OrderdeskError> {
        self.conn
            .lock()
            .map_err(|_| OrderdeskError::database("connection mutex poisoned"))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report/order/", get(routes::blocked_assets_report))
        .route("/report/customer/", get(routes::customer_report))
        .route("/report/product/", get(routes::product_report))
        .route("/product/", post(routes::save_product))
        .with_state(state)
}

pub async fn serve(conn: Connection, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("127.0.0.1:{port}").parse()?;
    let router = build_router(Arc::new(AppState::new(conn)));

    info!("orderdesk listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
