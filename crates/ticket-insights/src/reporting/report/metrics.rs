use crate::reporting::domain::TicketTable;
use serde::Serialize;

/// Label shown for the modal sector when the filtered subset is empty.
pub const NO_SECTOR_PLACEHOLDER: &str = "-";

/// The four headline KPIs over one filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketMetrics {
    pub mean_resolution_hours: f64,
    /// Share of tickets with status "Resolved", as a percentage in [0, 100].
    pub resolution_rate_pct: f64,
    pub total: usize,
    /// Most frequent sector; ties go to the sector first encountered in row
    /// order. `NO_SECTOR_PLACEHOLDER` when the subset is empty.
    pub top_sector: String,
}

impl TicketMetrics {
    pub fn compute(subset: &TicketTable) -> Self {
        if subset.is_empty() {
            return Self::empty();
        }

        let total = subset.len();
        let hours_sum: u64 = subset
            .tickets()
            .iter()
            .map(|ticket| u64::from(ticket.resolution_hours))
            .sum();
        let resolved = subset
            .tickets()
            .iter()
            .filter(|ticket| ticket.is_resolved())
            .count();

        Self {
            mean_resolution_hours: hours_sum as f64 / total as f64,
            resolution_rate_pct: resolved as f64 / total as f64 * 100.0,
            total,
            top_sector: modal_sector(subset),
        }
    }

    pub fn empty() -> Self {
        Self {
            mean_resolution_hours: 0.0,
            resolution_rate_pct: 0.0,
            total: 0,
            top_sector: NO_SECTOR_PLACEHOLDER.to_string(),
        }
    }
}

/// Most frequent sector, first-encountered wins on ties. Counting in
/// first-seen order and only replacing on a strictly greater count makes the
/// tie-break deterministic.
fn modal_sector(subset: &TicketTable) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for ticket in subset.tickets() {
        match counts.iter_mut().find(|(sector, _)| *sector == ticket.sector) {
            Some(entry) => entry.1 += 1,
            None => counts.push((ticket.sector.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (sector, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((sector, count)),
        }
    }

    best.map(|(sector, _)| sector.to_string())
        .unwrap_or_else(|| NO_SECTOR_PLACEHOLDER.to_string())
}
