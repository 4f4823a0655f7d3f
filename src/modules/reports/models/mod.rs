mod revenue_report;

pub use revenue_report::{
    ClientRevenue, MonthlyRevenue, RevenueReport, RevenueReportResponse, StatusBreakdown,
    StatusShare,
};
