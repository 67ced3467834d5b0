use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::{customer_repo, order_repo, product_repo, task_repo};
use crate::error::OrderdeskError;

/// Customer report page size, fixed by the reporting design.
const PAGE_SIZE: i64 = 10;

/// Inventory tied up in orders that have at least one open task. Field names
/// are the wire format of `GET /report/order/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedAssets {
    pub blocked_assets_total_quantity: i64,
    pub blocked_assets_total_price: f64,
}

pub fn blocked_assets(conn: &Connection) -> Result<BlockedAssets, OrderdeskError> {
    let (quantity, price) = order_repo::blocked_asset_totals(conn)?;
    Ok(BlockedAssets {
        blocked_assets_total_quantity: quantity,
        blocked_assets_total_price: price,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub total_products: i64,
    pub invalid_products: i64,
}

pub fn product_report(conn: &Connection) -> Result<ProductReport, OrderdeskError> {
    let (total, invalid) = product_repo::product_counts(conn)?;
    Ok(ProductReport {
        total_products: total,
        invalid_products: invalid,
    })
}

/// Query parameters of `GET /report/customer/`. For `has_open_tasks` only the
/// presence of the key matters; its value is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerReportParams {
    pub page: Option<String>,
    pub name: Option<String>,
    pub has_open_tasks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerReportRow {
    pub id: i64,
    pub name: String,
    pub todo: i64,
    pub in_progress: i64,
    pub done: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerReport {
    pub results: Vec<CustomerReportRow>,
}

/// Per-customer task-status tally over one page of customers (id ascending,
/// 10 per page). Counts cover tasks tied to the customer directly and tasks
/// tied to the customer's orders.
pub fn customer_report(
    conn: &Connection,
    params: &CustomerReportParams,
) -> Result<CustomerReport, OrderdeskError> {
    let offset = match &params.page {
        Some(page) => page_offset(page)?,
        None => 0,
    };

    let customers =
        customer_repo::list_customers_page(conn, params.name.as_deref(), PAGE_SIZE, offset)?;

    let mut results = Vec::with_capacity(customers.len());
    for customer in customers {
        let counts = task_repo::status_counts_for_customer(conn, customer.id)?;
        // Presence-only filter: drop customers with no open status rows.
        if params.has_open_tasks.is_some() && counts.todo == 0 && counts.in_progress == 0 {
            continue;
        }
        results.push(CustomerReportRow {
            id: customer.id,
            name: customer.name,
            todo: counts.todo,
            in_progress: counts.in_progress,
            done: counts.done,
        });
    }

    Ok(CustomerReport { results })
}

/// Page "1" starts at offset 0, page "2" at 10, and so on. Page "0" or a
/// negative page produces a negative offset, which the store clamps to the
/// start of the result set.
fn page_offset(page: &str) -> Result<i64, OrderdeskError> {
    let p: i64 = page.trim().parse().map_err(|e| {
        debug!(page, error = %e, "unparseable page parameter");
        OrderdeskError::bad_request()
    })?;
    Ok(p * PAGE_SIZE - PAGE_SIZE)
}
