mod invoice;
mod response;

pub use invoice::{CreateInvoiceRequest, Invoice, InvoiceStatus, UpdateInvoiceStatusRequest};
pub use response::{InvoiceResponse, InvoiceSummary};
