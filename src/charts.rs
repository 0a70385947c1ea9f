//! Chart builders: pure functions from a table view (and metrics) to a
//! declarative `ChartSpec` that serializes to Plotly-compatible JSON.
//!
//! Every builder returns `None` when its required column is missing or the
//! view is empty; callers skip that section, they never treat it as an
//! error.

use crate::metrics::MetricsSnapshot;
use crate::types::Table;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Fixed palette for the four known status labels; anything else falls back
/// to gray.
static STATUS_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Applied", "#00d4ff"),
        ("Rejected", "#ef4444"),
        ("Under Review", "#f97316"),
        ("Interview", "#22c55e"),
    ])
});

const FALLBACK_COLOR: &str = "#9e9e9e";

const BLUE_SCALE: &[(f64, &str)] = &[(0.0, "#e3f2fd"), (0.5, "#64b5f6"), (1.0, "#1976d2")];
const GREEN_RED_SCALE: &[(f64, &str)] = &[(0.0, "#c8e6c9"), (0.5, "#ffc107"), (1.0, "#f44336")];
const DEEP_BLUE_SCALE: &[(f64, &str)] = &[
    (0.0, "#e3f2fd"),
    (0.25, "#64b5f6"),
    (0.5, "#2196f3"),
    (0.75, "#1976d2"),
    (1.0, "#1565c0"),
];

fn status_color(label: &str) -> &'static str {
    STATUS_COLORS.get(label).copied().unwrap_or(FALLBACK_COLOR)
}

/// Granularity of the period activity histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Period {
    Weekly,
    Monthly,
}

impl Period {
    /// Bucket key for a date. Lexical order of the key is chronological
    /// for both formats.
    pub fn bucket(self, date: NaiveDate) -> String {
        match self {
            Period::Weekly => {
                let iso = date.iso_week();
                format!("{}-W{:02}", iso.year(), iso.week())
            }
            Period::Monthly => date.format("%Y-%m").to_string(),
        }
    }
}

/// The fixed set of visualizations, iterated uniformly by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    StatusDistribution,
    Timeline,
    CompanyFrequency,
    PositionFrequency,
    ResponseFunnel,
    StatusByCompany,
    WeeklyActivity,
    MonthlyActivity,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::StatusDistribution,
        ChartKind::Timeline,
        ChartKind::CompanyFrequency,
        ChartKind::PositionFrequency,
        ChartKind::ResponseFunnel,
        ChartKind::StatusByCompany,
        ChartKind::WeeklyActivity,
        ChartKind::MonthlyActivity,
    ];

    pub fn div_id(self) -> &'static str {
        match self {
            ChartKind::StatusDistribution => "status_chart",
            ChartKind::Timeline => "timeline_chart",
            ChartKind::CompanyFrequency => "company_chart",
            ChartKind::PositionFrequency => "position_chart",
            ChartKind::ResponseFunnel => "funnel_chart",
            ChartKind::StatusByCompany => "status_by_company_chart",
            ChartKind::WeeklyActivity => "weekly_chart",
            ChartKind::MonthlyActivity => "monthly_chart",
        }
    }

    pub fn section_title(self) -> &'static str {
        match self {
            ChartKind::StatusDistribution => "Status Distribution",
            ChartKind::Timeline => "Daily Application Trend",
            ChartKind::CompanyFrequency => "Most Applied Companies",
            ChartKind::PositionFrequency => "Most Applied Positions",
            ChartKind::ResponseFunnel => "Response Funnel",
            ChartKind::StatusByCompany => "Status by Company",
            ChartKind::WeeklyActivity => "Weekly Application Activity",
            ChartKind::MonthlyActivity => "Monthly Application Activity",
        }
    }

    /// Build the spec for this chart, or `None` when the view is empty or
    /// a required column is absent.
    pub fn build(self, table: &Table, metrics: &MetricsSnapshot) -> Option<ChartSpec> {
        if table.is_empty() {
            return None;
        }
        match self {
            ChartKind::StatusDistribution => status_distribution(table),
            ChartKind::Timeline => timeline(table),
            ChartKind::CompanyFrequency => company_frequency(table),
            ChartKind::PositionFrequency => position_frequency(table),
            ChartKind::ResponseFunnel => Some(response_funnel(self, metrics)),
            ChartKind::StatusByCompany => status_by_company(table),
            ChartKind::WeeklyActivity => period_activity(self, table, Period::Weekly),
            ChartKind::MonthlyActivity => period_activity(self, table, Period::Monthly),
        }
    }
}

/// Declarative description of one visualization. Stateless; regenerated
/// from the current view on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(skip)]
    pub div_id: &'static str,
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<u64>,
        hole: f64,
        marker: Marker,
        textinfo: String,
    },
    Scatter {
        x: Vec<String>,
        y: Vec<Option<f64>>,
        mode: String,
        name: String,
        line: Line,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
    },
    Bar {
        x: AxisData,
        y: AxisData,
        #[serde(skip_serializing_if = "Option::is_none")]
        orientation: Option<String>,
        marker: Marker,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<Vec<u64>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        textposition: Option<String>,
    },
    Funnel {
        y: Vec<String>,
        x: Vec<u64>,
        textinfo: String,
        marker: Marker,
    },
}

/// A bar axis is either category labels or numeric values, depending on
/// orientation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisData {
    Labels(Vec<String>),
    Values(Vec<u64>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Marker {
    /// Per-slice or per-stage colors (pie, funnel).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<Vec<(f64, &'static str)>>,
}

impl Marker {
    fn scaled(values: Vec<u64>, scale: &[(f64, &'static str)]) -> Marker {
        Marker {
            color: Some(MarkerColor::PerPoint(values)),
            colorscale: Some(scale.to_vec()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Fixed(String),
    /// Bar colors driven by the bar values through the colorscale.
    PerPoint(Vec<u64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Layout {
    fn titled(title: &str) -> Layout {
        Layout {
            title: title.to_string(),
            barmode: None,
            height: None,
            xaxis: None,
            yaxis: None,
            annotations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub showarrow: bool,
}

/// Count occurrences preserving first-seen order, then sort descending by
/// count. The sort is stable, so ties rank by first occurrence in the view.
/// That tie-break is the documented rule and is tested explicitly.
pub fn frequency_ranking<'a, I>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for v in values {
        match index.get(v) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(v, order.len());
                order.push((v.to_string(), 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

/// Applications per calendar day, ascending by date.
pub fn daily_counts(table: &Table) -> Vec<(NaiveDate, u64)> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for r in &table.records {
        if let Some(d) = r.date {
            *counts.entry(d).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

/// Applications per week or month bucket, ascending by bucket key.
pub fn period_counts(table: &Table, period: Period) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for r in &table.records {
        if let Some(d) = r.date {
            *counts.entry(period.bucket(d)).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

fn status_distribution(table: &Table) -> Option<ChartSpec> {
    if !table.columns.status {
        return None;
    }
    let ranking = frequency_ranking(
        table
            .records
            .iter()
            .filter_map(|r| r.status.as_ref().map(|s| s.label())),
    );
    if ranking.is_empty() {
        return None;
    }
    let labels: Vec<String> = ranking.iter().map(|(l, _)| l.clone()).collect();
    let values: Vec<u64> = ranking.iter().map(|(_, n)| *n).collect();
    let colors = labels.iter().map(|l| status_color(l).to_string()).collect();

    let mut layout = Layout::titled("Application Status Distribution");
    layout.annotations.push(Annotation {
        text: format!("<b>{}</b><br>Total", table.len()),
        x: 0.5,
        y: 0.5,
        showarrow: false,
    });
    Some(ChartSpec {
        div_id: ChartKind::StatusDistribution.div_id(),
        traces: vec![Trace::Pie {
            labels,
            values,
            hole: 0.6,
            marker: Marker {
                colors: Some(colors),
                ..Default::default()
            },
            textinfo: "label+percent".to_string(),
        }],
        layout,
    })
}

fn timeline(table: &Table) -> Option<ChartSpec> {
    if !table.columns.date {
        return None;
    }
    let daily = daily_counts(table);
    if daily.is_empty() {
        return None;
    }
    let x: Vec<String> = daily
        .iter()
        .map(|(d, _)| d.format("%Y-%m-%d").to_string())
        .collect();
    let counts: Vec<u64> = daily.iter().map(|(_, n)| *n).collect();

    let mut traces = vec![Trace::Scatter {
        x: x.clone(),
        y: counts.iter().map(|&n| Some(n as f64)).collect(),
        mode: "lines+markers".to_string(),
        name: "Applications".to_string(),
        line: Line {
            color: Some("#1f77b4".to_string()),
            width: 2,
            dash: None,
        },
        fill: Some("tozeroy".to_string()),
    }];

    // Trailing 7-day moving average, only once there are more than 7
    // distinct days; the first six positions stay empty.
    if daily.len() > 7 {
        let ma: Vec<Option<f64>> = (0..counts.len())
            .map(|i| {
                if i < 6 {
                    None
                } else {
                    let window = &counts[i - 6..=i];
                    Some(window.iter().sum::<u64>() as f64 / 7.0)
                }
            })
            .collect();
        traces.push(Trace::Scatter {
            x,
            y: ma,
            mode: "lines".to_string(),
            name: "7-day average".to_string(),
            line: Line {
                color: Some("#9c27b0".to_string()),
                width: 2,
                dash: Some("dash".to_string()),
            },
            fill: None,
        });
    }

    let mut layout = Layout::titled("Daily Application Trend");
    layout.xaxis = Some(Axis {
        title: Some("Date".to_string()),
        tickangle: None,
    });
    layout.yaxis = Some(Axis {
        title: Some("Applications".to_string()),
        tickangle: None,
    });
    Some(ChartSpec {
        div_id: ChartKind::Timeline.div_id(),
        traces,
        layout,
    })
}

fn company_frequency(table: &Table) -> Option<ChartSpec> {
    if !table.columns.company {
        return None;
    }
    let mut top: Vec<(String, u64)> = frequency_ranking(
        table
            .records
            .iter()
            .filter_map(|r| r.company.as_deref()),
    )
    .into_iter()
    .take(15)
    .collect();
    if top.is_empty() {
        return None;
    }
    // Horizontal bars read bottom-up, so display ascending by count.
    top.reverse();
    let companies: Vec<String> = top.iter().map(|(c, _)| c.clone()).collect();
    let values: Vec<u64> = top.iter().map(|(_, n)| *n).collect();

    let mut layout = Layout::titled("Most Applied Companies");
    layout.height = Some((top.len() as u32 * 35).max(400));
    layout.xaxis = Some(Axis {
        title: Some("Applications".to_string()),
        tickangle: None,
    });
    Some(ChartSpec {
        div_id: ChartKind::CompanyFrequency.div_id(),
        traces: vec![Trace::Bar {
            x: AxisData::Values(values.clone()),
            y: AxisData::Labels(companies),
            orientation: Some("h".to_string()),
            marker: Marker::scaled(values.clone(), BLUE_SCALE),
            name: None,
            text: Some(values),
            textposition: Some("outside".to_string()),
        }],
        layout,
    })
}

fn position_frequency(table: &Table) -> Option<ChartSpec> {
    if !table.columns.position {
        return None;
    }
    let top: Vec<(String, u64)> = frequency_ranking(
        table
            .records
            .iter()
            .filter_map(|r| r.position.as_deref()),
    )
    .into_iter()
    .take(12)
    .collect();
    if top.is_empty() {
        return None;
    }
    let positions: Vec<String> = top.iter().map(|(p, _)| p.clone()).collect();
    let values: Vec<u64> = top.iter().map(|(_, n)| *n).collect();

    let mut layout = Layout::titled("Most Applied Positions");
    layout.height = Some(450);
    layout.xaxis = Some(Axis {
        title: None,
        tickangle: Some(45),
    });
    layout.yaxis = Some(Axis {
        title: Some("Applications".to_string()),
        tickangle: None,
    });
    Some(ChartSpec {
        div_id: ChartKind::PositionFrequency.div_id(),
        traces: vec![Trace::Bar {
            x: AxisData::Labels(positions),
            y: AxisData::Values(values.clone()),
            orientation: None,
            marker: Marker::scaled(values.clone(), GREEN_RED_SCALE),
            name: None,
            text: Some(values),
            textposition: Some("outside".to_string()),
        }],
        layout,
    })
}

fn period_activity(kind: ChartKind, table: &Table, period: Period) -> Option<ChartSpec> {
    if !table.columns.date {
        return None;
    }
    let counts = period_counts(table, period);
    if counts.is_empty() {
        return None;
    }
    let (title, xaxis_title) = match period {
        Period::Weekly => ("Weekly Application Activity", "Week"),
        Period::Monthly => ("Monthly Application Activity", "Month"),
    };
    let labels: Vec<String> = counts.iter().map(|(p, _)| p.clone()).collect();
    let values: Vec<u64> = counts.iter().map(|(_, n)| *n).collect();

    let mut layout = Layout::titled(title);
    layout.height = Some(450);
    layout.xaxis = Some(Axis {
        title: Some(xaxis_title.to_string()),
        tickangle: Some(45),
    });
    layout.yaxis = Some(Axis {
        title: Some("Applications".to_string()),
        tickangle: None,
    });
    Some(ChartSpec {
        div_id: kind.div_id(),
        traces: vec![Trace::Bar {
            x: AxisData::Labels(labels),
            y: AxisData::Values(values.clone()),
            orientation: None,
            marker: Marker::scaled(values.clone(), DEEP_BLUE_SCALE),
            name: None,
            text: Some(values),
            textposition: Some("outside".to_string()),
        }],
        layout,
    })
}

fn response_funnel(kind: ChartKind, metrics: &MetricsSnapshot) -> ChartSpec {
    // Stage values come straight from the snapshot, never recomputed here.
    let stages = [
        "Total Applications",
        "Under Review",
        "Interview",
        "Rejected",
    ];
    let values = vec![
        metrics.total as u64,
        metrics.under_review as u64,
        metrics.interview as u64,
        metrics.rejected as u64,
    ];
    let mut layout = Layout::titled("Application Response Funnel");
    layout.height = Some(350);
    ChartSpec {
        div_id: kind.div_id(),
        traces: vec![Trace::Funnel {
            y: stages.iter().map(|s| s.to_string()).collect(),
            x: values,
            textinfo: "value+percent initial".to_string(),
            marker: Marker {
                colors: Some(
                    ["#2196f3", "#ff9800", "#4caf50", "#f44336"]
                        .iter()
                        .map(|c| c.to_string())
                        .collect(),
                ),
                ..Default::default()
            },
        }],
        layout,
    }
}

fn status_by_company(table: &Table) -> Option<ChartSpec> {
    if !table.columns.company || !table.columns.status {
        return None;
    }
    let top: HashSet<String> = frequency_ranking(
        table
            .records
            .iter()
            .filter_map(|r| r.company.as_deref()),
    )
    .into_iter()
    .take(10)
    .map(|(c, _)| c)
    .collect();
    if top.is_empty() {
        return None;
    }

    // Cross-tabulate status counts per top company. Companies outside the
    // top ten are excluded entirely, not folded into an "other" bucket.
    let mut cross: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
    for r in &table.records {
        let (Some(company), Some(status)) = (r.company.as_deref(), r.status.as_ref()) else {
            continue;
        };
        if !top.contains(company) {
            continue;
        }
        *cross
            .entry(company)
            .or_default()
            .entry(status.label())
            .or_default() += 1;
    }

    let companies: Vec<String> = cross.keys().map(|c| c.to_string()).collect();
    let statuses: Vec<&str> = {
        let mut set: BTreeMap<&str, ()> = BTreeMap::new();
        for by_status in cross.values() {
            for s in by_status.keys() {
                set.insert(s, ());
            }
        }
        set.into_keys().collect()
    };
    if statuses.is_empty() {
        return None;
    }

    let traces: Vec<Trace> = statuses
        .iter()
        .map(|status| Trace::Bar {
            x: AxisData::Labels(companies.clone()),
            y: AxisData::Values(
                cross
                    .values()
                    .map(|by_status| by_status.get(*status).copied().unwrap_or(0))
                    .collect(),
            ),
            orientation: None,
            marker: Marker {
                color: Some(MarkerColor::Fixed(status_color(status).to_string())),
                ..Default::default()
            },
            name: Some(status.to_string()),
            text: None,
            textposition: None,
        })
        .collect();

    let mut layout = Layout::titled("Top 10 Companies by Status");
    layout.barmode = Some("stack".to_string());
    layout.height = Some(500);
    layout.xaxis = Some(Axis {
        title: None,
        tickangle: Some(45),
    });
    layout.yaxis = Some(Axis {
        title: Some("Applications".to_string()),
        tickangle: None,
    });
    Some(ChartSpec {
        div_id: ChartKind::StatusByCompany.div_id(),
        traces,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_reader;

    fn table(csv: &str) -> Table {
        load_from_reader(csv.as_bytes()).unwrap().0
    }

    fn build(kind: ChartKind, t: &Table) -> Option<ChartSpec> {
        kind.build(t, &MetricsSnapshot::compute(t))
    }

    #[test]
    fn every_builder_is_unavailable_for_an_empty_view() {
        let t = table("Date,Company,Position,Status\n");
        for kind in ChartKind::ALL {
            assert!(build(kind, &t).is_none(), "{kind:?} should be None");
        }
    }

    #[test]
    fn builders_are_unavailable_without_their_column() {
        let t = table("Company\nAcme\n");
        assert!(build(ChartKind::StatusDistribution, &t).is_none());
        assert!(build(ChartKind::Timeline, &t).is_none());
        assert!(build(ChartKind::WeeklyActivity, &t).is_none());
        assert!(build(ChartKind::MonthlyActivity, &t).is_none());
        assert!(build(ChartKind::PositionFrequency, &t).is_none());
        assert!(build(ChartKind::StatusByCompany, &t).is_none());
        assert!(build(ChartKind::CompanyFrequency, &t).is_some());
    }

    #[test]
    fn building_twice_yields_identical_specs() {
        let t = table(
            "Date,Company,Position,Status\n\
             2024-01-10,Acme,Engineer,Interview\n\
             2024-01-07,Globex,Analyst,Applied\n\
             2024-01-05,Acme,Engineer,Rejected\n",
        );
        let m = MetricsSnapshot::compute(&t);
        for kind in ChartKind::ALL {
            assert_eq!(kind.build(&t, &m), kind.build(&t, &m));
        }
    }

    #[test]
    fn frequency_ranking_breaks_ties_by_first_occurrence() {
        let ranking = frequency_ranking(["b", "a", "c", "a", "c", "d"]);
        // a and c tie at 2: a was seen first. b and d tie at 1: b was first.
        assert_eq!(
            ranking,
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn status_distribution_shows_unknown_labels_with_fallback_color() {
        let t = table("Status\nApplied\nGhosted\nApplied\n");
        let spec = build(ChartKind::StatusDistribution, &t).unwrap();
        let Trace::Pie { labels, values, marker, .. } = &spec.traces[0] else {
            panic!("expected pie trace");
        };
        assert_eq!(labels, &["Applied".to_string(), "Ghosted".to_string()]);
        assert_eq!(values, &[2, 1]);
        let colors = marker.colors.as_ref().unwrap();
        assert_eq!(colors[0], "#00d4ff");
        assert_eq!(colors[1], FALLBACK_COLOR);
    }

    #[test]
    fn timeline_has_no_moving_average_at_seven_days_or_fewer() {
        let mut csv = String::from("Date\n");
        for day in 1..=7 {
            csv.push_str(&format!("2024-01-{day:02}\n"));
        }
        let spec = build(ChartKind::Timeline, &table(&csv)).unwrap();
        assert_eq!(spec.traces.len(), 1);
    }

    #[test]
    fn timeline_moving_average_starts_after_six_days() {
        let mut csv = String::from("Date\n");
        for day in 1..=8 {
            csv.push_str(&format!("2024-01-{day:02}\n"));
        }
        let spec = build(ChartKind::Timeline, &table(&csv)).unwrap();
        assert_eq!(spec.traces.len(), 2);
        let Trace::Scatter { y, .. } = &spec.traces[1] else {
            panic!("expected scatter trace");
        };
        assert_eq!(y.len(), 8);
        assert!(y[..6].iter().all(Option::is_none));
        assert_eq!(y[6], Some(1.0));
        assert_eq!(y[7], Some(1.0));
    }

    #[test]
    fn company_frequency_displays_ascending_by_count() {
        let t = table("Company\nAcme\nAcme\nAcme\nGlobex\nGlobex\nInitech\n");
        let spec = build(ChartKind::CompanyFrequency, &t).unwrap();
        let Trace::Bar { x: AxisData::Values(values), y: AxisData::Labels(labels), .. } =
            &spec.traces[0]
        else {
            panic!("expected horizontal bar trace");
        };
        assert_eq!(labels, &["Initech", "Globex", "Acme"]);
        assert_eq!(values, &[1, 2, 3]);
    }

    #[test]
    fn position_frequency_caps_at_twelve() {
        let mut csv = String::from("Position\n");
        for i in 0..20 {
            csv.push_str(&format!("Role {i}\n"));
        }
        let spec = build(ChartKind::PositionFrequency, &table(&csv)).unwrap();
        let Trace::Bar { x: AxisData::Labels(labels), .. } = &spec.traces[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(labels.len(), 12);
    }

    #[test]
    fn period_buckets_sort_chronologically() {
        let t = table("Date\n2024-03-15\n2024-01-10\n2024-01-20\n2023-12-31\n");
        let spec = build(ChartKind::MonthlyActivity, &t).unwrap();
        let Trace::Bar { x: AxisData::Labels(labels), y: AxisData::Values(values), .. } =
            &spec.traces[0]
        else {
            panic!("expected bar trace");
        };
        assert_eq!(labels, &["2023-12", "2024-01", "2024-03"]);
        assert_eq!(values, &[1, 2, 1]);
    }

    #[test]
    fn weekly_bucket_uses_iso_week_keys() {
        assert_eq!(
            Period::Weekly.bucket(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            "2024-W02"
        );
        // Jan 1st 2023 belongs to ISO week 52 of 2022.
        assert_eq!(
            Period::Weekly.bucket(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()),
            "2022-W52"
        );
    }

    #[test]
    fn funnel_values_come_from_the_snapshot() {
        let t = table("Status\nApplied\nRejected\nUnder Review\nInterview\nInterview\n");
        let m = MetricsSnapshot::compute(&t);
        let spec = ChartKind::ResponseFunnel.build(&t, &m).unwrap();
        let Trace::Funnel { x, y, .. } = &spec.traces[0] else {
            panic!("expected funnel trace");
        };
        assert_eq!(
            y,
            &["Total Applications", "Under Review", "Interview", "Rejected"]
        );
        assert_eq!(
            x,
            &[
                m.total as u64,
                m.under_review as u64,
                m.interview as u64,
                m.rejected as u64
            ]
        );
    }

    #[test]
    fn status_by_company_excludes_companies_outside_the_top_ten() {
        let mut csv = String::from("Company,Status\n");
        // Eleven companies; "Last" appears once and every other twice.
        for i in 0..10 {
            csv.push_str(&format!("Company {i},Applied\n"));
            csv.push_str(&format!("Company {i},Rejected\n"));
        }
        csv.push_str("Last,Applied\n");
        let spec = build(ChartKind::StatusByCompany, &table(&csv)).unwrap();
        let Trace::Bar { x: AxisData::Labels(companies), .. } = &spec.traces[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(companies.len(), 10);
        assert!(!companies.iter().any(|c| c == "Last"));
        // One stacked trace per status present among the top companies.
        assert_eq!(spec.traces.len(), 2);
    }

    #[test]
    fn chart_specs_serialize_to_plotly_shapes() {
        let t = table("Status\nApplied\n");
        let spec = build(ChartKind::StatusDistribution, &t).unwrap();
        let json = serde_json::to_value(&spec.traces).unwrap();
        assert_eq!(json[0]["type"], "pie");
        assert_eq!(json[0]["hole"], 0.6);
        assert_eq!(json[0]["marker"]["colors"][0], "#00d4ff");
    }
}
