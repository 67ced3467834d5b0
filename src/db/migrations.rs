use rusqlite::Connection;

use crate::error::OrderdeskError;

pub fn run_migrations(conn: &Connection) -> Result<(), OrderdeskError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            sku TEXT,
            price REAL
        );

        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            is_delivered INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS order_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            quantity INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT,
            order_id INTEGER REFERENCES orders(id) ON DELETE CASCADE,
            product_id INTEGER REFERENCES products(id) ON DELETE CASCADE,
            customer_id INTEGER REFERENCES customers(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS task_status (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            status_category TEXT NOT NULL DEFAULT 'TO_DO'
                CHECK (status_category IN ('TO_DO', 'IN_PROGRESS', 'DONE'))
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_order ON tasks(order_id)
            WHERE order_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_tasks_product ON tasks(product_id)
            WHERE product_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_tasks_customer ON tasks(customer_id)
            WHERE customer_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_status_task ON task_status(task_id, status_category);
        CREATE INDEX IF NOT EXISTS idx_items_order ON order_items(order_id);
        ",
    )?;
    Ok(())
}
