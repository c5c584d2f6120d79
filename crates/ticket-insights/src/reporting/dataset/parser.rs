use super::DatasetError;
use crate::reporting::domain::{Ticket, TicketTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;

/// Raw CSV row before the opening date is coerced. Keeping the date as a
/// string lets the loader accept both date-only exports and the datetime
/// stamps the synthetic bootstrap historically wrote.
#[derive(Debug, Deserialize)]
struct TicketRow {
    id: u32,
    sector: String,
    opened_at: String,
    status: String,
    resolution_hours: u32,
}

pub(super) fn parse_tickets<R: Read>(reader: R) -> Result<TicketTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut tickets = Vec::new();

    for (index, record) in csv_reader.deserialize::<TicketRow>().enumerate() {
        let row = record?;
        let opened_at =
            parse_opened_at(&row.opened_at).ok_or_else(|| DatasetError::InvalidDate {
                // header occupies line 1
                line: index as u64 + 2,
                value: row.opened_at.clone(),
            })?;

        tickets.push(Ticket {
            id: row.id,
            sector: row.sector,
            opened_at,
            status: row.status,
            resolution_hours: row.resolution_hours,
        });
    }

    Ok(TicketTable::new(tickets))
}

fn parse_opened_at(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
