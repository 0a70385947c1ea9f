use crate::types::Table;
use chrono::NaiveDate;

/// The active filter selection, carried explicitly into the filtering step
/// rather than living in module-level state. Defaults select everything.
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    /// Inclusive lower bound on the record date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the record date.
    pub to: Option<NaiveDate>,
    /// Status labels to keep; empty means all statuses.
    pub statuses: Vec<String>,
    /// Exact company to keep; `None` means all companies.
    pub company: Option<String>,
}

impl FilterContext {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.statuses.is_empty() && self.company.is_none()
    }

    /// Produce a new view of the table containing only matching records.
    /// The input table is never mutated; record order is preserved.
    pub fn apply(&self, table: &Table) -> Table {
        if self.is_empty() {
            return table.clone();
        }
        let records = table
            .records
            .iter()
            .filter(|r| {
                if self.from.is_some() || self.to.is_some() {
                    // An undated record cannot be shown to lie in the range.
                    let Some(date) = r.date else { return false };
                    if self.from.is_some_and(|from| date < from) {
                        return false;
                    }
                    if self.to.is_some_and(|to| date > to) {
                        return false;
                    }
                }
                if !self.statuses.is_empty() {
                    let matches = r
                        .status
                        .as_ref()
                        .is_some_and(|s| self.statuses.iter().any(|want| want == s.label()));
                    if !matches {
                        return false;
                    }
                }
                if let Some(company) = &self.company {
                    if r.company.as_deref() != Some(company.as_str()) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        Table {
            records,
            columns: table.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_reader;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn fixture() -> Table {
        let csv = "Date,Company,Position,Status\n\
                   2024-01-10,Acme,Engineer,Interview\n\
                   2024-01-07,Globex,Analyst,Applied\n\
                   2024-01-05,Acme,Engineer,Rejected\n\
                   2024-01-02,Initech,Engineer,Under Review\n";
        load_from_reader(csv.as_bytes()).unwrap().0
    }

    #[test]
    fn empty_context_clones_the_view() {
        let table = fixture();
        let view = FilterContext::default().apply(&table);
        assert_eq!(view, table);
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let table = fixture();
        let ctx = FilterContext {
            from: Some(d(2024, 1, 5)),
            to: Some(d(2024, 1, 7)),
            ..Default::default()
        };
        let view = ctx.apply(&table);
        let dates: Vec<_> = view.records.iter().map(|r| r.date.unwrap()).collect();
        assert_eq!(dates, [d(2024, 1, 7), d(2024, 1, 5)]);
    }

    #[test]
    fn status_multi_select_keeps_any_listed_label() {
        let table = fixture();
        let ctx = FilterContext {
            statuses: vec!["Interview".into(), "Rejected".into()],
            ..Default::default()
        };
        let view = ctx.apply(&table);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn company_select_is_exact() {
        let table = fixture();
        let ctx = FilterContext {
            company: Some("Acme".into()),
            ..Default::default()
        };
        let view = ctx.apply(&table);
        assert_eq!(view.len(), 2);
        assert!(view.records.iter().all(|r| r.company.as_deref() == Some("Acme")));
    }

    #[test]
    fn filtering_leaves_the_source_table_intact() {
        let table = fixture();
        let before = table.clone();
        let ctx = FilterContext {
            company: Some("Acme".into()),
            statuses: vec!["Interview".into()],
            ..Default::default()
        };
        let _ = ctx.apply(&table);
        assert_eq!(table, before);
    }

    #[test]
    fn undated_records_fail_a_date_range_filter() {
        let csv = "Company,Status\nAcme,Applied\n";
        let table = load_from_reader(csv.as_bytes()).unwrap().0;
        let ctx = FilterContext {
            from: Some(d(2024, 1, 1)),
            ..Default::default()
        };
        assert!(ctx.apply(&table).is_empty());
    }
}
