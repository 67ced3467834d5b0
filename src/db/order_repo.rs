use rusqlite::{params, Connection};

use crate::error::OrderdeskError;
use crate::models::{Order, OrderItem};

pub fn create_order(
    conn: &Connection,
    customer_id: i64,
    is_delivered: bool,
) -> Result<Order, OrderdeskError> {
    conn.execute(
        "INSERT INTO orders (customer_id, is_delivered) VALUES (?1, ?2)",
        params![customer_id, is_delivered],
    )?;
    Ok(Order {
        id: conn.last_insert_rowid(),
        customer_id,
        is_delivered,
    })
}

pub fn create_order_item(
    conn: &Connection,
    order_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<OrderItem, OrderdeskError> {
    conn.execute(
        "INSERT INTO order_items (order_id, product_id, quantity) VALUES (?1, ?2, ?3)",
        params![order_id, product_id, quantity],
    )?;
    Ok(OrderItem {
        id: conn.last_insert_rowid(),
        order_id,
        product_id,
        quantity,
    })
}

/// Totals over line items of blocked orders, i.e. orders referenced by a task
/// with at least one TO_DO or IN_PROGRESS status row.
///
/// Items whose product has a null price still count towards the quantity sum
/// but drop out of the price sum (NULL terms are skipped by SUM).
pub fn blocked_asset_totals(conn: &Connection) -> Result<(i64, f64), OrderdeskError> {
    let totals = conn.query_row(
        "SELECT COALESCE(SUM(oi.quantity), 0),
                COALESCE(SUM(oi.quantity * p.price), 0.0)
         FROM order_items oi
         JOIN products p ON p.id = oi.product_id
         WHERE oi.order_id IN (
             SELECT t.order_id
             FROM tasks t
             JOIN task_status ts ON ts.task_id = t.id
             WHERE t.order_id IS NOT NULL
               AND ts.status_category IN ('TO_DO', 'IN_PROGRESS')
         )",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(totals)
}
