use crate::infra::resolve_selection;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use ticket_insights::config::AppConfig;
use ticket_insights::error::AppError;
use ticket_insights::reporting::dataset::{ensure_dataset, write_tickets_to_path};
use ticket_insights::reporting::report::views::TicketReportSummary;
use ticket_insights::reporting::{
    DatasetSource, FilterSelection, TicketMetrics, TicketReport, TicketTable,
};

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Ticket CSV path (falls back to APP_DATASET_PATH; bootstrapped if missing)
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Inclusive period start (YYYY-MM-DD); defaults to the earliest date on file
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Inclusive period end (YYYY-MM-DD); defaults to the latest date on file
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Sector to include (repeatable; omit for every sector)
    #[arg(long = "sector")]
    pub(crate) sectors: Vec<String>,
    /// Status to include (repeatable; omit for every status)
    #[arg(long = "status")]
    pub(crate) statuses: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    /// Include the detailed ticket table in the output
    #[arg(long)]
    pub(crate) list_tickets: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    /// Destination for the filtered CSV
    #[arg(long, default_value = "filtered_tickets.csv")]
    pub(crate) output: PathBuf,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        filter,
        list_tickets,
    } = args;

    let (table, source, selection) = load_and_select(filter)?;
    let subset = table.filter(&selection);
    let metrics = TicketMetrics::compute(&subset);
    let summary = TicketReport::build(&subset).summary();

    render_dashboard(
        &selection,
        source,
        table.len(),
        &subset,
        &metrics,
        &summary,
        list_tickets,
    );

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs { filter, output } = args;

    let (table, _, selection) = load_and_select(filter)?;
    let subset = table.filter(&selection);
    write_tickets_to_path(&output, &subset)?;

    if subset.is_empty() {
        println!(
            "No tickets match the current filters; wrote a header-only file to {}",
            output.display()
        );
    } else {
        println!("Wrote {} tickets to {}", subset.len(), output.display());
    }

    Ok(())
}

fn load_and_select(
    args: FilterArgs,
) -> Result<(TicketTable, DatasetSource, FilterSelection), AppError> {
    let path = match args.data {
        Some(path) => path,
        None => AppConfig::load()?.dataset.path,
    };

    let today = Local::now().date_naive();
    let (table, source) = ensure_dataset(path, today)?;

    let sectors = (!args.sectors.is_empty()).then_some(args.sectors);
    let statuses = (!args.statuses.is_empty()).then_some(args.statuses);
    let selection = resolve_selection(&table, args.start, args.end, sectors, statuses);

    Ok((table, source, selection))
}

fn render_dashboard(
    selection: &FilterSelection,
    source: DatasetSource,
    rows_on_file: usize,
    subset: &TicketTable,
    metrics: &TicketMetrics,
    summary: &TicketReportSummary,
    list_tickets: bool,
) {
    println!("Ticket dashboard");
    println!(
        "Period: {} -> {} | sectors: {} | statuses: {}",
        selection.period.start,
        selection.period.end,
        selection.sectors.join(", "),
        selection.statuses.join(", ")
    );
    println!(
        "Data source: {} ({} of {} tickets selected)",
        source.label(),
        subset.len(),
        rows_on_file
    );

    println!("\nHeadline metrics");
    println!(
        "- Mean resolution time: {:.1}h",
        metrics.mean_resolution_hours
    );
    println!("- Resolution rate: {:.1}%", metrics.resolution_rate_pct);
    println!("- Total tickets: {}", metrics.total);
    println!("- Busiest sector: {}", metrics.top_sector);

    if !summary.has_data() {
        println!("\nNo tickets match the current filters.");
        return;
    }

    println!("\nTickets by sector");
    for entry in &summary.sector_counts {
        println!("- {}: {}", entry.sector, entry.count);
    }

    println!("\nStatus distribution");
    for entry in &summary.status_counts {
        println!("- {}: {}", entry.status, entry.count);
    }

    println!("\nResolution hours by sector");
    for entry in &summary.resolution_by_sector {
        let min = entry.hours.iter().min().copied().unwrap_or(0);
        let max = entry.hours.iter().max().copied().unwrap_or(0);
        println!(
            "- {}: {} tickets, {}h to {}h",
            entry.sector,
            entry.hours.len(),
            min,
            max
        );
    }

    println!("\nMonthly volume");
    for entry in &summary.monthly_counts {
        println!("- {}: {}", entry.month, entry.count);
    }

    if list_tickets {
        println!("\nTicket detail");
        for ticket in subset.tickets() {
            println!(
                "- #{} | {} | {} | {} | {}h",
                ticket.id, ticket.sector, ticket.opened_at, ticket.status, ticket.resolution_hours
            );
        }
    }
}
