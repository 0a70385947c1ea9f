use chrono::NaiveDate;
use serde::Deserialize;
use tabled::Tabled;

/// One row of the CSV as the `csv` crate hands it to us. Every field is
/// optional: a column missing from the header simply deserializes to `None`
/// on every record, and an empty cell deserializes to `None` too.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Position")]
    pub position: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Gmail Link")]
    pub gmail_link: Option<String>,
}

/// Application outcome label. The four known labels are matched exactly and
/// case-sensitively; anything else is carried through as `Other` with its
/// original text so the status-distribution chart can still show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Applied,
    Rejected,
    UnderReview,
    Interview,
    Other(String),
}

impl Status {
    pub fn parse(label: &str) -> Status {
        match label {
            "Applied" => Status::Applied,
            "Rejected" => Status::Rejected,
            "Under Review" => Status::UnderReview,
            "Interview" => Status::Interview,
            other => Status::Other(other.to_string()),
        }
    }

    /// The label as it appeared in the source file.
    pub fn label(&self) -> &str {
        match self {
            Status::Applied => "Applied",
            Status::Rejected => "Rejected",
            Status::UnderReview => "Under Review",
            Status::Interview => "Interview",
            Status::Other(s) => s,
        }
    }
}

/// One cleaned, typed record. Identity is positional (row order from the
/// source file); records are never mutated after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRecord {
    pub date: Option<NaiveDate>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<Status>,
    pub contact_link: Option<String>,
}

/// Which of the recognized columns the header actually carried, captured
/// once at load time. Downstream code treats an absent column as "feature
/// unavailable", never as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    pub date: bool,
    pub company: bool,
    pub position: bool,
    pub status: bool,
    pub contact_link: bool,
}

impl Columns {
    pub fn from_headers<'a, I>(headers: I) -> Columns
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cols = Columns::default();
        for h in headers {
            match h {
                "Date" => cols.date = true,
                "Company" => cols.company = true,
                "Position" => cols.position = true,
                "Status" => cols.status = true,
                "Gmail Link" => cols.contact_link = true,
                _ => {}
            }
        }
        cols
    }

    pub fn none_present(&self) -> bool {
        !(self.date || self.company || self.position || self.status || self.contact_link)
    }
}

/// The working table: an ordered sequence of records plus the column
/// presence flags. Filtering produces a new `Table`; the loaded one is
/// never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub records: Vec<ApplicationRecord>,
    pub columns: Columns,
}

impl Table {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// Console preview rows for the `summary` subcommand, rendered with
// `tabled`'s markdown style.

#[derive(Debug, Clone, Tabled)]
pub struct CompanyRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Company")]
    pub company: String,
    #[tabled(rename = "Applications")]
    pub applications: u64,
}

#[derive(Debug, Clone, Tabled)]
pub struct StatusRow {
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Count")]
    pub count: u64,
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct PeriodRow {
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Applications")]
    pub applications: u64,
}

#[derive(Debug, Clone, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Company")]
    pub company: String,
    #[tabled(rename = "Position")]
    pub position: String,
    #[tabled(rename = "Status")]
    pub status: String,
}
