use rusqlite::{params, Connection};

use crate::error::OrderdeskError;
use crate::models::Product;

pub fn get_product(conn: &Connection, id: i64) -> Result<Product, OrderdeskError> {
    conn.query_row(
        "SELECT id, name, sku, price FROM products WHERE id = ?1",
        params![id],
        row_to_product,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => OrderdeskError::not_found("Product", id),
        _ => OrderdeskError::from(e),
    })
}

pub fn insert_product(
    conn: &Connection,
    name: Option<&str>,
    sku: Option<&str>,
    price: Option<f64>,
) -> Result<Product, OrderdeskError> {
    conn.execute(
        "INSERT INTO products (name, sku, price) VALUES (?1, ?2, ?3)",
        params![name, sku, price],
    )?;
    Ok(Product {
        id: conn.last_insert_rowid(),
        name: name.map(str::to_string),
        sku: sku.map(str::to_string),
        price,
    })
}

pub fn update_product(conn: &Connection, product: &Product) -> Result<(), OrderdeskError> {
    let changed = conn.execute(
        "UPDATE products SET name = ?1, sku = ?2, price = ?3 WHERE id = ?4",
        params![product.name, product.sku, product.price, product.id],
    )?;
    if changed == 0 {
        return Err(OrderdeskError::not_found("Product", product.id));
    }
    Ok(())
}

/// (total, invalid) product counts. A product is invalid when name, sku or
/// price is null.
pub fn product_counts(conn: &Connection) -> Result<(i64, i64), OrderdeskError> {
    let counts = conn.query_row(
        "SELECT COUNT(id),
                COUNT(CASE WHEN name IS NULL OR sku IS NULL OR price IS NULL THEN 1 END)
         FROM products",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(counts)
}

fn row_to_product(row: &rusqlite::Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        sku: row.get(2)?,
        price: row.get(3)?,
    })
}
