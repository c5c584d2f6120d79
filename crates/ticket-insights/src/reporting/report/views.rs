use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SectorCountEntry {
    pub sector: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: String,
    pub count: usize,
}

/// Raw resolution-hours values for one sector, in row order. The box-plot
/// primitive downstream derives quartiles and outliers from these.
#[derive(Debug, Clone, Serialize)]
pub struct SectorResolutionEntry {
    pub sector: String,
    pub hours: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyCountEntry {
    /// Calendar month bucket, `YYYY-MM`.
    pub month: String,
    pub count: usize,
}

/// The four chart-feeding views over one filtered subset. All vectors are
/// empty when the subset is empty; that is the defined no-data signal.
#[derive(Debug, Clone, Serialize)]
pub struct TicketReportSummary {
    pub sector_counts: Vec<SectorCountEntry>,
    pub status_counts: Vec<StatusCountEntry>,
    pub resolution_by_sector: Vec<SectorResolutionEntry>,
    pub monthly_counts: Vec<MonthlyCountEntry>,
}

impl TicketReportSummary {
    pub fn has_data(&self) -> bool {
        !self.sector_counts.is_empty()
    }
}
