use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::db::{product_repo, task_repo};
use crate::error::OrderdeskError;
use crate::models::{Product, StatusCategory};

// Placeholder strings stamped onto auto-created data-quality tasks.
const PRODUCT_TASK_DESCRIPTION: &str = "random prod task description";
const PRODUCT_TASK_STATUS_NAME: &str = "product task name";

/// `POST /product/` payload. Absent keys null the field out on an existing
/// product; this is a full overwrite, not a patch.
#[derive(Debug, Deserialize)]
struct SaveProductRequest {
    id: Option<i64>,
    name: Option<String>,
    sku: Option<String>,
    price: Option<f64>,
}

/// Create or fully overwrite a product, then reconcile its data-quality task.
/// The write and the reconciliation commit as one transaction, so concurrent
/// saves cannot leave two open status rows for the same product.
pub fn save_product(conn: &mut Connection, body: Value) -> Result<Product, OrderdeskError> {
    let request: SaveProductRequest = serde_json::from_value(body).map_err(|e| {
        warn!(error = %e, "rejected product save payload");
        OrderdeskError::bad_request()
    })?;

    let tx = conn.transaction()?;
    let product = match request.id {
        Some(id) => {
            let mut product = product_repo::get_product(&tx, id)?;
            product.name = request.name;
            product.sku = request.sku;
            product.price = request.price;
            product_repo::update_product(&tx, &product)?;
            product
        }
        None => product_repo::insert_product(
            &tx,
            request.name.as_deref(),
            request.sku.as_deref(),
            request.price,
        )?,
    };
    reconcile_product_tasks(&tx, &product)?;
    tx.commit()?;
    Ok(product)
}

/// Runs after every product write, unconditionally.
///
/// Invalid product: ensure exactly one open TO_DO status row exists for the
/// product's task, creating task and status as needed (idempotent when one is
/// already open). Valid product: flip every TO_DO row of its tasks to DONE.
pub fn reconcile_product_tasks(
    conn: &Connection,
    product: &Product,
) -> Result<(), OrderdeskError> {
    if product.is_valid() {
        let closed = task_repo::complete_product_statuses(conn, product.id)?;
        if closed > 0 {
            debug!(product_id = product.id, closed, "closed data-quality task statuses");
        }
    } else if !task_repo::product_has_todo_status(conn, product.id)? {
        let task_id =
            task_repo::upsert_product_task(conn, product.id, PRODUCT_TASK_DESCRIPTION)?;
        task_repo::create_task_status(
            conn,
            Some(PRODUCT_TASK_STATUS_NAME),
            task_id,
            StatusCategory::ToDo,
        )?;
        debug!(product_id = product.id, task_id, "opened data-quality task");
    }
    Ok(())
}
