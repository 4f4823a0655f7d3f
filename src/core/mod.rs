pub mod error;
pub mod money;
pub mod pdf;
pub mod retry;
pub mod validate;

pub use error::{AppError, Result};
pub use validate::{Unvalidated, Valid};
