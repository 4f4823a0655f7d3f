pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use rate_limit::RateLimiter;
pub use request_id::RequestId;
pub use session::{token_digest, SessionAuth, SessionContext};
