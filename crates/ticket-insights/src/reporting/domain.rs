use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Known ticket lifecycle states. The backing file may carry labels outside
/// this set; records keep the raw string and this enum covers the stock
/// vocabulary used for bootstrap data and default selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Open, Self::InProgress, Self::Resolved]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In progress",
            Self::Resolved => "Resolved",
        }
    }

    pub fn labels() -> Vec<String> {
        Self::ordered()
            .into_iter()
            .map(|status| status.label().to_string())
            .collect()
    }
}

/// Sector vocabulary used when bootstrapping a synthetic dataset. Real
/// backing files may introduce additional sectors.
pub const DEFAULT_SECTORS: [&str; 5] = ["Finance", "IT", "HR", "Commercial", "Logistics"];

/// One service-request record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub sector: String,
    pub opened_at: NaiveDate,
    pub status: String,
    pub resolution_hours: u32,
}

impl Ticket {
    pub fn is_resolved(&self) -> bool {
        self.status == TicketStatus::Resolved.label()
    }
}

/// Ordered, read-only collection of tickets loaded at process start. Filtering
/// produces new tables; the loaded table is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketTable {
    tickets: Vec<Ticket>,
}

impl TicketTable {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Distinct sectors present, sorted. Callers use this to resolve an
    /// unset sector selection to "everything".
    pub fn distinct_sectors(&self) -> Vec<String> {
        let mut sectors: Vec<String> = self
            .tickets
            .iter()
            .map(|ticket| ticket.sector.clone())
            .collect();
        sectors.sort();
        sectors.dedup();
        sectors
    }

    /// Distinct status labels present, sorted.
    pub fn distinct_statuses(&self) -> Vec<String> {
        let mut statuses: Vec<String> = self
            .tickets
            .iter()
            .map(|ticket| ticket.status.clone())
            .collect();
        statuses.sort();
        statuses.dedup();
        statuses
    }

    /// Earliest and latest opening dates in the table, if any rows exist.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.tickets.first()?.opened_at;
        let span = self
            .tickets
            .iter()
            .fold((first, first), |(min, max), ticket| {
                (min.min(ticket.opened_at), max.max(ticket.opened_at))
            });
        Some(span)
    }
}

impl FromIterator<Ticket> for TicketTable {
    fn from_iter<I: IntoIterator<Item = Ticket>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
