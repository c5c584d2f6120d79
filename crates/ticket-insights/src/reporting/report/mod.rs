mod metrics;
mod summary;
pub mod views;

pub use metrics::{TicketMetrics, NO_SECTOR_PLACEHOLDER};
pub use summary::TicketReport;
