use rusqlite::{params, Connection};

use crate::error::OrderdeskError;
use crate::models::Customer;

pub fn create_customer(conn: &Connection, name: &str) -> Result<Customer, OrderdeskError> {
    conn.execute("INSERT INTO customers (name) VALUES (?1)", params![name])?;
    Ok(Customer {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// One page of customers in id order, optionally filtered by a
/// case-insensitive substring match on the name. LIKE metacharacters in the
/// filter are escaped so they match literally. A negative offset is passed
/// through; SQLite treats it as zero.
pub fn list_customers_page(
    conn: &Connection,
    name_filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Customer>, OrderdeskError> {
    let pattern = name_filter.map(escape_like);
    let mut stmt = conn.prepare(
        "SELECT id, name FROM customers
         WHERE ?1 IS NULL OR name LIKE '%' || ?1 || '%' ESCAPE '\\'
         ORDER BY id ASC
         LIMIT ?2 OFFSET ?3",
    )?;
    let customers = stmt
        .query_map(params![pattern, limit, offset], |row| {
            Ok(Customer {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(customers)
}

/// `%` and `_` in the filter are literal characters, not wildcards.
fn escape_like(filter: &str) -> String {
    filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
