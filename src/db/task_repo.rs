use rusqlite::{params, Connection};

use crate::error::OrderdeskError;
use crate::models::{StatusCategory, Task, TaskStatus, TaskSubject};

pub fn create_task(
    conn: &Connection,
    description: Option<&str>,
    subject: TaskSubject,
) -> Result<Task, OrderdeskError> {
    let (order_id, product_id, customer_id) = subject.to_columns();
    conn.execute(
        "INSERT INTO tasks (description, order_id, product_id, customer_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![description, order_id, product_id, customer_id],
    )?;
    Ok(Task {
        id: conn.last_insert_rowid(),
        description: description.map(str::to_string),
        subject,
    })
}

pub fn create_task_status(
    conn: &Connection,
    name: Option<&str>,
    task_id: i64,
    status_category: StatusCategory,
) -> Result<TaskStatus, OrderdeskError> {
    conn.execute(
        "INSERT INTO task_status (name, task_id, status_category) VALUES (?1, ?2, ?3)",
        params![name, task_id, status_category.as_str()],
    )?;
    Ok(TaskStatus {
        id: conn.last_insert_rowid(),
        name: name.map(str::to_string),
        task_id,
        status_category,
    })
}

/// Whether any task referencing the product currently has a TO_DO status row.
pub fn product_has_todo_status(conn: &Connection, product_id: i64) -> Result<bool, OrderdeskError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS (
             SELECT 1
             FROM task_status ts
             JOIN tasks t ON t.id = ts.task_id
             WHERE t.product_id = ?1 AND ts.status_category = 'TO_DO'
         )",
        params![product_id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Upsert the task keyed on the product reference: overwrite the description
/// of the existing task, or insert a fresh one. Returns the task id.
pub fn upsert_product_task(
    conn: &Connection,
    product_id: i64,
    description: &str,
) -> Result<i64, OrderdeskError> {
    let mut stmt = conn.prepare("SELECT id FROM tasks WHERE product_id = ?1 ORDER BY id LIMIT 1")?;
    let mut rows = stmt.query(params![product_id])?;
    match rows.next()? {
        Some(row) => {
            let id: i64 = row.get(0)?;
            conn.execute(
                "UPDATE tasks SET description = ?1 WHERE id = ?2",
                params![description, id],
            )?;
            Ok(id)
        }
        None => {
            let task = create_task(conn, Some(description), TaskSubject::Product(product_id))?;
            Ok(task.id)
        }
    }
}

/// Flip every TO_DO status row of the product's tasks to DONE. Returns the
/// number of rows updated.
pub fn complete_product_statuses(
    conn: &Connection,
    product_id: i64,
) -> Result<usize, OrderdeskError> {
    let changed = conn.execute(
        "UPDATE task_status SET status_category = 'DONE'
         WHERE status_category = 'TO_DO'
           AND task_id IN (SELECT id FROM tasks WHERE product_id = ?1)",
        params![product_id],
    )?;
    Ok(changed)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: i64,
    pub in_progress: i64,
    pub done: i64,
}

/// Count status rows by category over every task tied to the customer,
/// either directly or through one of the customer's orders. Every status row
/// counts; this is full history, not a latest-status lookup.
pub fn status_counts_for_customer(
    conn: &Connection,
    customer_id: i64,
) -> Result<StatusCounts, OrderdeskError> {
    let counts = conn.query_row(
        "SELECT COUNT(CASE WHEN ts.status_category = 'TO_DO' THEN 1 END),
                COUNT(CASE WHEN ts.status_category = 'IN_PROGRESS' THEN 1 END),
                COUNT(CASE WHEN ts.status_category = 'DONE' THEN 1 END)
         FROM task_status ts
         JOIN tasks t ON t.id = ts.task_id
         LEFT JOIN orders o ON o.id = t.order_id
         WHERE t.customer_id = ?1 OR o.customer_id = ?1",
        params![customer_id],
        |row| {
            Ok(StatusCounts {
                todo: row.get(0)?,
                in_progress: row.get(1)?,
                done: row.get(2)?,
            })
        },
    )?;
    Ok(counts)
}
