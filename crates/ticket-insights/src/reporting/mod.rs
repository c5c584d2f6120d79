pub mod dataset;
pub mod domain;
pub mod filter;
pub mod report;

pub use dataset::{DatasetError, DatasetSource};
pub use domain::{Ticket, TicketStatus, TicketTable};
pub use filter::{DateRange, FilterSelection};
pub use report::{TicketMetrics, TicketReport};
