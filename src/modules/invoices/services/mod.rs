mod invoice_service;
pub mod pdf_renderer;

pub use invoice_service::InvoiceService;
