pub mod connection;
pub mod customer_repo;
pub mod migrations;
pub mod order_repo;
pub mod product_repo;
pub mod seed;
pub mod task_repo;

pub use connection::*;
