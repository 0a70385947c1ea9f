use crate::types::{ApplicationRecord, Columns, RawRow, Status, Table};
use crate::util::parse_date_flexible;
use std::cmp::Ordering;
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// A file fails to load only when it cannot be read as tabular data at all.
/// A missing `Date`/`Company`/`Status` column is not an error; downstream
/// code treats it as "feature unavailable".
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("no recognized columns in header (expected any of Date, Company, Position, Status, Gmail Link)")]
    NoRecognizedColumns,
}

/// Per-load ingest diagnostics, printed by the CLI after a load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub dropped_dates: usize,
}

pub fn load_from_path(path: &Path) -> Result<(Table, LoadReport), LoadError> {
    let file = File::open(path)?;
    load_from_reader(file)
}

pub fn load_from_reader<R: io::Read>(reader: R) -> Result<(Table, LoadReport), LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let columns = Columns::from_headers(rdr.headers()?.iter());
    if columns.none_present() {
        return Err(LoadError::NoRecognizedColumns);
    }

    let mut total_rows = 0usize;
    let mut dropped_dates = 0usize;
    let mut records: Vec<ApplicationRecord> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        total_rows += 1;
        let row = result?;

        // When the Date column exists, a row whose date cell does not parse
        // (including an empty cell) is dropped, not an error.
        let date = if columns.date {
            match row.date.as_deref().and_then(parse_date_flexible) {
                Some(d) => Some(d),
                None => {
                    dropped_dates += 1;
                    debug!(row = total_rows, value = ?row.date, "dropping row with unparseable date");
                    continue;
                }
            }
        } else {
            None
        };

        records.push(ApplicationRecord {
            date,
            company: clean(row.company),
            position: clean(row.position),
            status: clean(row.status).map(|s| Status::parse(&s)),
            contact_link: clean(row.gmail_link),
        });
    }

    sort_records(&mut records);
    let loaded_rows = records.len();
    Ok((
        Table { records, columns },
        LoadReport {
            total_rows,
            loaded_rows,
            dropped_dates,
        },
    ))
}

/// Date descending, undated records after all dated ones. The sort is
/// stable, so ties and undated records keep their original file order.
pub fn sort_records(records: &mut [ApplicationRecord]) {
    records.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn clean(field: Option<String>) -> Option<String> {
    field.and_then(|s| {
        let t = s.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}
