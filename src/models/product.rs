use serde::{Deserialize, Serialize};

/// A catalogue product. All three attribute fields are nullable; a product
/// with any of them missing is considered invalid and gets a data-quality
/// task opened against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
}

impl Product {
    pub fn is_valid(&self) -> bool {
        self.name.is_some() && self.sku.is_some() && self.price.is_some()
    }
}
