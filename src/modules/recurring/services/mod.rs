mod recurring_service;

pub use recurring_service::RecurringInvoiceService;
