mod estimate_repository;

pub use estimate_repository::{EstimateRepository, EstimateWithClient, MySqlEstimateRepository};
