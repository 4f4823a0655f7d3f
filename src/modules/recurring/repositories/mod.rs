mod recurring_repository;

pub use recurring_repository::{
    MySqlRecurringInvoiceRepository, RecurringInvoiceRepository, RecurringWithClient,
};
