mod bootstrap;
mod parser;

use crate::reporting::domain::TicketTable;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

pub use bootstrap::{generate_tickets, SYNTHETIC_ROWS};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read ticket dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ticket CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unparseable opening date '{value}' on line {line}")]
    InvalidDate { line: u64, value: String },
}

/// Where the in-memory table came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSource {
    File,
    Generated,
}

impl DatasetSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "backing file",
            Self::Generated => "generated bootstrap",
        }
    }
}

/// Parse a ticket CSV. Fails on the first malformed row; a partially loaded
/// table is never returned.
pub fn parse_tickets<R: Read>(reader: R) -> Result<TicketTable, DatasetError> {
    parser::parse_tickets(reader)
}

pub fn load_tickets<P: AsRef<Path>>(path: P) -> Result<TicketTable, DatasetError> {
    let file = std::fs::File::open(path)?;
    parse_tickets(file)
}

/// Serialize a table back to the flat format the loader reads: header row,
/// then `id,sector,opened_at,status,resolution_hours` with date-only stamps.
pub fn write_tickets<W: Write>(writer: W, table: &TicketTable) -> Result<(), DatasetError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    // written explicitly so an empty subset still exports a header row
    csv_writer.write_record(["id", "sector", "opened_at", "status", "resolution_hours"])?;
    for ticket in table.tickets() {
        csv_writer.serialize(ticket)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_tickets_to_path<P: AsRef<Path>>(
    path: P,
    table: &TicketTable,
) -> Result<(), DatasetError> {
    let file = std::fs::File::create(path)?;
    write_tickets(file, table)
}

/// CSV text for download responses.
pub fn tickets_to_csv(table: &TicketTable) -> Result<String, DatasetError> {
    let mut buffer = Vec::new();
    write_tickets(&mut buffer, table)?;
    Ok(String::from_utf8(buffer).expect("csv output is utf-8"))
}

/// Load the backing file, or bootstrap a synthetic one when it is absent.
/// The generated table is persisted before it is returned so subsequent
/// loads see the same data.
pub fn ensure_dataset<P: AsRef<Path>>(
    path: P,
    today: NaiveDate,
) -> Result<(TicketTable, DatasetSource), DatasetError> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok((load_tickets(path)?, DatasetSource::File));
    }

    let table = generate_tickets(today, SYNTHETIC_ROWS, &mut rand::thread_rng());
    write_tickets_to_path(path, &table)?;
    info!(path = %path.display(), rows = table.len(), "backing file missing, synthetic dataset written");
    Ok((table, DatasetSource::Generated))
}
