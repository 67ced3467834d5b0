pub mod customer;
pub mod order;
pub mod product;
pub mod task;

pub use customer::*;
pub use order::*;
pub use product::*;
pub use task::*;
