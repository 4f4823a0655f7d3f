mod recurring_invoice;
mod response;

pub use recurring_invoice::{CreateRecurringInvoiceRequest, Frequency, RecurringInvoice};
pub use response::{RecurringInvoiceResponse, RecurringInvoiceSummary};
