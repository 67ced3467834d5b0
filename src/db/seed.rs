use rusqlite::Connection;

use crate::error::OrderdeskError;
use crate::models::{StatusCategory, TaskSubject};

use super::{customer_repo, order_repo, product_repo, task_repo};

/// Load the demo dataset: three customers, four priced products, one
/// undelivered order with an open task (blocking its 8 + 3 line items), one
/// delivered order without tasks, and one in-progress customer task.
pub fn seed(conn: &mut Connection) -> Result<(), OrderdeskError> {
    let tx = conn.transaction()?;

    let donald = customer_repo::create_customer(&tx, "Donald Boyle")?;
    let henry = customer_repo::create_customer(&tx, "Henry Wallis")?;
    let andrew = customer_repo::create_customer(&tx, "Andrew Owen")?;

    let customer_task = task_repo::create_task(
        &tx,
        Some("customer task description"),
        TaskSubject::Customer(donald.id),
    )?;
    task_repo::create_task_status(
        &tx,
        Some("random customer task"),
        customer_task.id,
        StatusCategory::InProgress,
    )?;

    let banana = product_repo::insert_product(&tx, Some("banana"), Some("kg"), Some(10.99))?;
    let mango = product_repo::insert_product(&tx, Some("mango"), Some("kg"), Some(9.99))?;
    let _lemon = product_repo::insert_product(&tx, Some("lemon"), Some("kg"), Some(2.99))?;
    let grape = product_repo::insert_product(&tx, Some("grape"), Some("kg"), Some(4.99))?;

    let order_1 = order_repo::create_order(&tx, henry.id, false)?;
    order_repo::create_order_item(&tx, order_1.id, banana.id, 8)?;
    order_repo::create_order_item(&tx, order_1.id, mango.id, 3)?;

    let order_task = task_repo::create_task(
        &tx,
        Some("order task description"),
        TaskSubject::Order(order_1.id),
    )?;
    task_repo::create_task_status(
        &tx,
        Some("random order task"),
        order_task.id,
        StatusCategory::ToDo,
    )?;

    let order_2 = order_repo::create_order(&tx, andrew.id, true)?;
    order_repo::create_order_item(&tx, order_2.id, grape.id, 30)?;

    tx.commit()?;
    Ok(())
}
