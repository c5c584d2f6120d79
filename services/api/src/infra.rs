use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use ticket_insights::reporting::{
    DatasetSource, DateRange, FilterSelection, TicketTable,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The table loaded (or bootstrapped) at startup. Read-only for the process
/// lifetime; every request filters its own subset from it.
#[derive(Clone)]
pub(crate) struct DatasetState {
    pub(crate) table: Arc<TicketTable>,
    pub(crate) source: DatasetSource,
}

/// Resolve the caller's partial filter input against the loaded table:
/// unset dates fall back to the table's full span, unset vocabularies to
/// everything present. The filter engine itself never substitutes defaults.
pub(crate) fn resolve_selection(
    table: &TicketTable,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    sectors: Option<Vec<String>>,
    statuses: Option<Vec<String>>,
) -> FilterSelection {
    let defaults = FilterSelection::all_of(table);
    FilterSelection {
        period: DateRange::new(
            start.unwrap_or(defaults.period.start),
            end.unwrap_or(defaults.period.end),
        ),
        sectors: sectors.unwrap_or(defaults.sectors),
        statuses: statuses.unwrap_or(defaults.statuses),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_insights::reporting::Ticket;

    fn table() -> TicketTable {
        TicketTable::new(vec![
            Ticket {
                id: 1,
                sector: "IT".to_string(),
                opened_at: NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date"),
                status: "Open".to_string(),
                resolution_hours: 4,
            },
            Ticket {
                id: 2,
                sector: "HR".to_string(),
                opened_at: NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date"),
                status: "Resolved".to_string(),
                resolution_hours: 12,
            },
        ])
    }

    #[test]
    fn unset_fields_resolve_to_the_full_table() {
        let table = table();
        let selection = resolve_selection(&table, None, None, None, None);
        assert_eq!(selection, FilterSelection::all_of(&table));
        assert_eq!(table.filter(&selection).len(), table.len());
    }

    #[test]
    fn explicit_fields_override_the_defaults() {
        let table = table();
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date");
        let selection = resolve_selection(
            &table,
            Some(start),
            None,
            Some(vec!["HR".to_string()]),
            None,
        );

        assert_eq!(selection.period.start, start);
        assert_eq!(selection.sectors, vec!["HR".to_string()]);
        assert_eq!(selection.statuses, table.distinct_statuses());
    }

    #[test]
    fn explicit_empty_vocabulary_is_passed_through() {
        let table = table();
        let selection = resolve_selection(&table, None, None, Some(Vec::new()), None);
        assert!(table.filter(&selection).is_empty());
    }
}
