pub mod auth;
pub mod clients;
pub mod documents;
pub mod estimates;
pub mod health;
pub mod invoices;
pub mod products;
pub mod profiles;
pub mod recurring;
pub mod reports;
