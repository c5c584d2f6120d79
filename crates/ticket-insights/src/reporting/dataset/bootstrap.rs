use crate::reporting::domain::{Ticket, TicketStatus, TicketTable, DEFAULT_SECTORS};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Size of the synthetic table written when no backing file exists.
pub const SYNTHETIC_ROWS: usize = 100;

/// Synthetic ticket table: sectors and statuses drawn uniformly from the
/// stock vocabularies, opening dates uniform over the trailing 365 days
/// before `today`, resolution hours uniform in 1..=71.
pub fn generate_tickets<R: Rng>(today: NaiveDate, count: usize, rng: &mut R) -> TicketTable {
    let statuses = TicketStatus::ordered();

    (1..=count)
        .map(|id| {
            let sector = DEFAULT_SECTORS[rng.gen_range(0..DEFAULT_SECTORS.len())];
            let status = statuses[rng.gen_range(0..statuses.len())];
            let days_back = rng.gen_range(0..=365);

            Ticket {
                id: id as u32,
                sector: sector.to_string(),
                opened_at: today - Duration::days(days_back),
                status: status.label().to_string(),
                resolution_hours: rng.gen_range(1..=71),
            }
        })
        .collect()
}
