pub mod exclusion;
pub mod filings;
pub mod golden;
pub mod peers;
pub mod quality;
pub mod report;
pub mod shared;
