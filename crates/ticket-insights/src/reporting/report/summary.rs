use super::views::{
    MonthlyCountEntry, SectorCountEntry, SectorResolutionEntry, StatusCountEntry,
    TicketReportSummary,
};
use crate::reporting::domain::TicketTable;
use chrono::Datelike;
use std::collections::BTreeMap;

/// The four aggregation views derived from a filtered subset. Sector and
/// status groups are keyed alphabetically, month buckets chronologically;
/// BTreeMap keys give both orderings for free.
#[derive(Debug, Default)]
pub struct TicketReport {
    sector_counts: BTreeMap<String, usize>,
    status_counts: BTreeMap<String, usize>,
    resolution_by_sector: BTreeMap<String, Vec<u32>>,
    monthly_counts: BTreeMap<(i32, u32), usize>,
}

impl TicketReport {
    pub fn build(subset: &TicketTable) -> Self {
        let mut report = Self::default();

        for ticket in subset.tickets() {
            *report.sector_counts.entry(ticket.sector.clone()).or_default() += 1;
            *report.status_counts.entry(ticket.status.clone()).or_default() += 1;
            report
                .resolution_by_sector
                .entry(ticket.sector.clone())
                .or_default()
                .push(ticket.resolution_hours);
            let bucket = (ticket.opened_at.year(), ticket.opened_at.month());
            *report.monthly_counts.entry(bucket).or_default() += 1;
        }

        report
    }

    pub fn summary(&self) -> TicketReportSummary {
        let sector_counts = self
            .sector_counts
            .iter()
            .map(|(sector, count)| SectorCountEntry {
                sector: sector.clone(),
                count: *count,
            })
            .collect();

        let status_counts = self
            .status_counts
            .iter()
            .map(|(status, count)| StatusCountEntry {
                status: status.clone(),
                count: *count,
            })
            .collect();

        let resolution_by_sector = self
            .resolution_by_sector
            .iter()
            .map(|(sector, hours)| SectorResolutionEntry {
                sector: sector.clone(),
                hours: hours.clone(),
            })
            .collect();

        let monthly_counts = self
            .monthly_counts
            .iter()
            .map(|((year, month), count)| MonthlyCountEntry {
                month: format!("{year:04}-{month:02}"),
                count: *count,
            })
            .collect();

        TicketReportSummary {
            sector_counts,
            status_counts,
            resolution_by_sector,
            monthly_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::domain::{Ticket, TicketStatus};
    use chrono::NaiveDate;

    fn ticket(id: u32, sector: &str, month: u32, day: u32, hours: u32) -> Ticket {
        Ticket {
            id,
            sector: sector.to_string(),
            opened_at: NaiveDate::from_ymd_opt(2024, month, day).expect("valid date"),
            status: TicketStatus::Open.label().to_string(),
            resolution_hours: hours,
        }
    }

    #[test]
    fn counts_sum_to_subset_total() {
        let subset = TicketTable::new(vec![
            ticket(1, "IT", 1, 5, 10),
            ticket(2, "HR", 1, 9, 4),
            ticket(3, "IT", 2, 2, 7),
        ]);

        let summary = TicketReport::build(&subset).summary();
        let sector_total: usize = summary.sector_counts.iter().map(|e| e.count).sum();
        let status_total: usize = summary.status_counts.iter().map(|e| e.count).sum();
        assert_eq!(sector_total, subset.len());
        assert_eq!(status_total, subset.len());
    }

    #[test]
    fn sector_groups_are_alphabetical_and_keep_row_order_within() {
        let subset = TicketTable::new(vec![
            ticket(1, "IT", 1, 5, 10),
            ticket(2, "HR", 1, 9, 4),
            ticket(3, "IT", 2, 2, 7),
        ]);

        let summary = TicketReport::build(&subset).summary();
        let sectors: Vec<&str> = summary
            .resolution_by_sector
            .iter()
            .map(|e| e.sector.as_str())
            .collect();
        assert_eq!(sectors, vec!["HR", "IT"]);
        assert_eq!(summary.resolution_by_sector[1].hours, vec![10, 7]);
    }

    #[test]
    fn month_buckets_sort_chronologically_across_years() {
        let subset = TicketTable::new(vec![
            Ticket {
                opened_at: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
                ..ticket(1, "IT", 1, 1, 3)
            },
            Ticket {
                opened_at: NaiveDate::from_ymd_opt(2023, 12, 30).expect("valid date"),
                ..ticket(2, "IT", 1, 1, 3)
            },
            Ticket {
                opened_at: NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date"),
                ..ticket(3, "IT", 1, 1, 3)
            },
        ]);

        let summary = TicketReport::build(&subset).summary();
        let months: Vec<&str> = summary.monthly_counts.iter().map(|e| e.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01"]);
        assert_eq!(summary.monthly_counts[1].count, 2);
    }

    #[test]
    fn empty_subset_yields_empty_views() {
        let summary = TicketReport::build(&TicketTable::default()).summary();
        assert!(!summary.has_data());
        assert!(summary.status_counts.is_empty());
        assert!(summary.resolution_by_sector.is_empty());
        assert!(summary.monthly_counts.is_empty());
    }
}
