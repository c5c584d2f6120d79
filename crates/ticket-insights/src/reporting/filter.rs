use super::domain::{Ticket, TicketTable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One rendering pass worth of filter input. The engine applies the three
/// predicates conjunctively and performs no default substitution: an empty
/// sector or status list matches nothing. Resolving "unset means all" is the
/// caller's job, via [`FilterSelection::all_of`] or its own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub period: DateRange,
    pub sectors: Vec<String>,
    pub statuses: Vec<String>,
}

impl FilterSelection {
    /// Selection matching every row of `table`: full date span plus the full
    /// sector and status vocabularies present in it.
    pub fn all_of(table: &TicketTable) -> Self {
        let (start, end) = table
            .date_span()
            .unwrap_or_else(|| (NaiveDate::MIN, NaiveDate::MAX));
        Self {
            period: DateRange::new(start, end),
            sectors: table.distinct_sectors(),
            statuses: table.distinct_statuses(),
        }
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.sectors.iter().any(|sector| sector == &ticket.sector)
            && self.statuses.iter().any(|status| status == &ticket.status)
            && self.period.contains(ticket.opened_at)
    }
}

impl TicketTable {
    /// Row subset satisfying `selection`. Pure and order-preserving: the
    /// input table is untouched and surviving rows keep their order.
    pub fn filter(&self, selection: &FilterSelection) -> TicketTable {
        self.tickets()
            .iter()
            .filter(|ticket| selection.matches(ticket))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::domain::TicketStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sample_table() -> TicketTable {
        TicketTable::new(vec![
            Ticket {
                id: 1,
                sector: "IT".to_string(),
                opened_at: date(2024, 1, 5),
                status: TicketStatus::Resolved.label().to_string(),
                resolution_hours: 10,
            },
            Ticket {
                id: 2,
                sector: "IT".to_string(),
                opened_at: date(2024, 2, 10),
                status: TicketStatus::Open.label().to_string(),
                resolution_hours: 5,
            },
            Ticket {
                id: 3,
                sector: "HR".to_string(),
                opened_at: date(2024, 1, 20),
                status: TicketStatus::Resolved.label().to_string(),
                resolution_hours: 20,
            },
        ])
    }

    #[test]
    fn all_of_matches_every_row() {
        let table = sample_table();
        let selection = FilterSelection::all_of(&table);
        assert_eq!(table.filter(&selection), table);
    }

    #[test]
    fn predicates_apply_conjunctively() {
        let table = sample_table();
        let selection = FilterSelection {
            period: DateRange::new(date(2024, 1, 1), date(2024, 12, 31)),
            sectors: vec!["IT".to_string()],
            statuses: TicketStatus::labels(),
        };

        let subset = table.filter(&selection);
        let ids: Vec<u32> = subset.tickets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let table = sample_table();
        let selection = FilterSelection {
            period: DateRange::new(date(2024, 1, 5), date(2024, 1, 20)),
            sectors: table.distinct_sectors(),
            statuses: table.distinct_statuses(),
        };

        let ids: Vec<u32> = table.filter(&selection).tickets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn empty_sector_selection_matches_nothing() {
        let table = sample_table();
        let selection = FilterSelection {
            period: DateRange::new(date(2024, 1, 1), date(2024, 12, 31)),
            sectors: Vec::new(),
            statuses: table.distinct_statuses(),
        };

        assert!(table.filter(&selection).is_empty());
    }

    #[test]
    fn inverted_range_yields_an_empty_subset() {
        let table = sample_table();
        let selection = FilterSelection {
            period: DateRange::new(date(2024, 12, 31), date(2024, 1, 1)),
            sectors: table.distinct_sectors(),
            statuses: table.distinct_statuses(),
        };

        assert!(table.filter(&selection).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = sample_table();
        let selection = FilterSelection {
            period: DateRange::new(date(2024, 1, 1), date(2024, 1, 31)),
            sectors: vec!["IT".to_string(), "HR".to_string()],
            statuses: TicketStatus::labels(),
        };

        let once = table.filter(&selection);
        let twice = once.filter(&selection);
        assert_eq!(once, twice);
    }
}
