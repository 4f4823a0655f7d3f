mod product_repository;

pub use product_repository::{MySqlProductRepository, ProductRepository};
