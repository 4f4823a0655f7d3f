mod estimate;
mod response;

pub use estimate::{
    CreateEstimateRequest, Estimate, EstimateStatus, UpdateEstimateStatusRequest,
};
pub use response::{EstimateResponse, EstimateSummary};
