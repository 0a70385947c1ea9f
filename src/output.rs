use crate::metrics::MetricsSnapshot;
use crate::types::Table;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::Path;
use tabled::{settings::Style, Table as ConsoleTable, Tabled};

/// Re-export the current view as CSV, keeping the same recognized column
/// set the input carried, in canonical order. Dates are written as
/// `%Y-%m-%d`, absent fields as empty cells.
pub fn export_csv(path: &Path, table: &Table) -> Result<()> {
    let cols = table.columns;
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = Vec::new();
    if cols.date {
        header.push("Date");
    }
    if cols.company {
        header.push("Company");
    }
    if cols.position {
        header.push("Position");
    }
    if cols.status {
        header.push("Status");
    }
    if cols.contact_link {
        header.push("Gmail Link");
    }
    wtr.write_record(&header)?;

    for r in &table.records {
        let mut record: Vec<String> = Vec::new();
        if cols.date {
            record.push(
                r.date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            );
        }
        if cols.company {
            record.push(r.company.clone().unwrap_or_default());
        }
        if cols.position {
            record.push(r.position.clone().unwrap_or_default());
        }
        if cols.status {
            record.push(r.status.as_ref().map(|s| s.label().to_string()).unwrap_or_default());
        }
        if cols.contact_link {
            record.push(r.contact_link.clone().unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_metrics_json(path: &Path, metrics: &MetricsSnapshot) -> Result<()> {
    let s = serde_json::to_string_pretty(metrics)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Default file name for the CSV re-export, e.g. `basvuru_analiz_20240601.csv`.
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("basvuru_analiz_{}.csv", now.format("%Y%m%d"))
}

/// Default file name for the HTML dashboard,
/// e.g. `basvuru_dashboard_20240601_123045.html`.
pub fn dashboard_file_name(now: DateTime<Local>) -> String {
    format!("basvuru_dashboard_{}.html", now.format("%Y%m%d_%H%M%S"))
}

/// Print the first `max_rows` rows as a markdown table.
pub fn preview_table<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = ConsoleTable::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
