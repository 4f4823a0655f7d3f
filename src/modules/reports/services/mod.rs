mod report_pdf;
mod report_service;

pub use report_service::ReportService;
