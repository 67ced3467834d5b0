pub mod products;
pub mod reports;
