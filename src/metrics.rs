use crate::types::{Status, Table};
use serde::Serialize;
use std::collections::HashSet;

/// Point-in-time aggregate summary of a table view. Derived, immutable,
/// recomputed from scratch whenever the view changes.
///
/// `total` equals the sum of the four per-status counts only when every
/// record carries one of the four known labels; records with an unknown or
/// absent status count toward `total` alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total: usize,
    pub applied: usize,
    pub rejected: usize,
    pub under_review: usize,
    pub interview: usize,
    pub rejection_rate: f64,
    pub response_rate: f64,
    pub interview_rate: f64,
    pub unique_companies: usize,
}

impl MetricsSnapshot {
    pub fn compute(table: &Table) -> MetricsSnapshot {
        let total = table.len();
        let mut applied = 0;
        let mut rejected = 0;
        let mut under_review = 0;
        let mut interview = 0;
        for r in &table.records {
            match r.status {
                Some(Status::Applied) => applied += 1,
                Some(Status::Rejected) => rejected += 1,
                Some(Status::UnderReview) => under_review += 1,
                Some(Status::Interview) => interview += 1,
                Some(Status::Other(_)) | None => {}
            }
        }

        let rate = |n: usize| {
            if total == 0 {
                0.0
            } else {
                n as f64 / total as f64 * 100.0
            }
        };

        let unique_companies = table
            .records
            .iter()
            .filter_map(|r| r.company.as_deref())
            .collect::<HashSet<_>>()
            .len();

        MetricsSnapshot {
            total,
            applied,
            rejected,
            under_review,
            interview,
            rejection_rate: rate(rejected),
            response_rate: rate(rejected + interview + under_review),
            interview_rate: rate(interview),
            unique_companies,
        }
    }
}
