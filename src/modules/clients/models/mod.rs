mod client;
mod response;

pub use client::{Client, ClientSummary, CreateClientRequest};
pub use response::ClientDetailResponse;
