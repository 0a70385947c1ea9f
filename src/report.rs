//! Standalone HTML dashboard assembly. Everything is inlined except one
//! script reference for the Plotly runtime; an unavailable chart
//! contributes an empty section rather than a failure.

use crate::charts::{frequency_ranking, ChartKind, ChartSpec};
use crate::metrics::MetricsSnapshot;
use crate::types::Table;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const TABLE_EXCERPT_ROWS: usize = 100;

pub fn render_dashboard(
    table: &Table,
    metrics: &MetricsSnapshot,
    generated_at: DateTime<Local>,
) -> String {
    let mut sections = String::new();

    let _ = write!(
        sections,
        r#"<div class="metrics-grid">{}{}{}{}{}{}</div>"#,
        metric_card(&metrics.total.to_string(), "Total Applications"),
        metric_card(&metrics.unique_companies.to_string(), "Distinct Companies"),
        metric_card(&metrics.interview.to_string(), "Interview Invites"),
        metric_card(&metrics.under_review.to_string(), "Under Review"),
        metric_card(&format!("{:.1}%", metrics.rejection_rate), "Rejection Rate"),
        metric_card(&format!("{:.1}%", metrics.response_rate), "Response Rate"),
    );

    sections.push_str(&overview_section(table, metrics));

    for kind in ChartKind::ALL {
        let body = match kind.build(table, metrics) {
            Some(spec) => chart_div(&spec),
            None => String::new(),
        };
        let _ = write!(
            sections,
            r#"<div class="section"><h2>{}</h2><div class="chart-container">{}</div></div>"#,
            kind.section_title(),
            body
        );
    }

    sections.push_str(&excerpt_section(table));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Job Application Dashboard</title>
<script src="{PLOTLY_CDN}"></script>
<style>{CSS}</style>
</head>
<body>
<div class="container">
<div class="header">
<h1>Job Application Dashboard</h1>
<p>Report date: {header_ts}</p>
</div>
{sections}
<div class="footer">
<p><strong>Job Application Analytics</strong></p>
<p>Generated: {footer_ts}</p>
</div>
</div>
</body>
</html>
"#,
        header_ts = generated_at.format("%d/%m/%Y %H:%M"),
        footer_ts = generated_at.format("%d/%m/%Y %H:%M:%S"),
    )
}

fn metric_card(value: &str, label: &str) -> String {
    format!(
        r#"<div class="metric-card"><div class="metric-value">{}</div><div class="metric-label">{}</div></div>"#,
        escape(value),
        label
    )
}

/// Detailed metric list, rates, top-10 company ranking and the status
/// distribution with percentages.
fn overview_section(table: &Table, metrics: &MetricsSnapshot) -> String {
    let mut s = String::from(r#"<div class="section"><h2>General Statistics</h2>"#);

    let _ = write!(
        s,
        r#"<div class="info-box"><h3>Detailed Metrics</h3><ul>
<li><strong>Total applications:</strong> {}</li>
<li><strong>Distinct companies:</strong> {}</li>
<li><strong>Interview invites:</strong> {}</li>
<li><strong>Under review:</strong> {}</li>
<li><strong>Rejected:</strong> {}</li>
<li><strong>Applied:</strong> {}</li>
</ul></div>"#,
        metrics.total,
        metrics.unique_companies,
        metrics.interview,
        metrics.under_review,
        metrics.rejected,
        metrics.applied,
    );

    let _ = write!(
        s,
        r#"<div class="info-box"><h3>Rates</h3><ul>
<li><strong>Rejection rate:</strong> {:.1}%</li>
<li><strong>Response rate:</strong> {:.1}%</li>
<li><strong>Interview rate:</strong> {:.1}%</li>
</ul></div>"#,
        metrics.rejection_rate, metrics.response_rate, metrics.interview_rate,
    );

    if table.columns.company {
        let top = frequency_ranking(table.records.iter().filter_map(|r| r.company.as_deref()));
        if !top.is_empty() {
            s.push_str(r#"<div class="info-box"><h3>Top 10 Companies</h3><ul>"#);
            for (rank, (company, count)) in top.iter().take(10).enumerate() {
                let _ = write!(
                    s,
                    "<li><strong>{}. {}</strong>: {} applications</li>",
                    rank + 1,
                    escape(company),
                    count
                );
            }
            s.push_str("</ul></div>");
        }
    }

    if table.columns.status && !table.is_empty() {
        let dist = frequency_ranking(
            table
                .records
                .iter()
                .filter_map(|r| r.status.as_ref().map(|st| st.label())),
        );
        if !dist.is_empty() {
            s.push_str(r#"<div class="info-box"><h3>Status Distribution</h3><ul>"#);
            for (label, count) in &dist {
                let share = *count as f64 / table.len() as f64 * 100.0;
                let _ = write!(
                    s,
                    "<li><strong>{}</strong>: {} ({:.1}%)</li>",
                    escape(label),
                    count,
                    share
                );
            }
            s.push_str("</ul></div>");
        }
    }

    s.push_str("</div>");
    s
}

/// First records of the current view (by its sort order), capped at
/// [`TABLE_EXCERPT_ROWS`], with the contact link rendered as a link when
/// that column exists.
fn excerpt_section(table: &Table) -> String {
    let mut s = format!(
        r#"<div class="section"><h2>Application Details (first {TABLE_EXCERPT_ROWS} records)</h2><table><thead><tr>"#
    );
    for header in ["Date", "Company", "Position", "Status"] {
        let _ = write!(s, "<th>{header}</th>");
    }
    if table.columns.contact_link {
        s.push_str("<th>Gmail Link</th>");
    }
    s.push_str("</tr></thead><tbody>");

    for r in table.records.iter().take(TABLE_EXCERPT_ROWS) {
        s.push_str("<tr>");
        let date = r
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        for cell in [
            date.as_str(),
            r.company.as_deref().unwrap_or(""),
            r.position.as_deref().unwrap_or(""),
            r.status.as_ref().map(|st| st.label()).unwrap_or(""),
        ] {
            let _ = write!(s, "<td>{}</td>", escape(cell));
        }
        if table.columns.contact_link {
            match r.contact_link.as_deref() {
                Some(url) => {
                    let _ = write!(s, r#"<td><a href="{}">Open</a></td>"#, escape(url));
                }
                None => s.push_str("<td></td>"),
            }
        }
        s.push_str("</tr>");
    }
    s.push_str("</tbody></table></div>");
    s
}

fn chart_div(spec: &ChartSpec) -> String {
    format!(
        r#"<div id="{id}" class="plot"></div>
<script>Plotly.newPlot("{id}", {traces}, {layout}, {{"responsive": true}});</script>"#,
        id = spec.div_id,
        traces = json(&spec.traces),
        layout = json(&spec.layout),
    )
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    padding: 20px;
    color: #333;
}
.container {
    max-width: 1400px;
    margin: 0 auto;
    background: white;
    border-radius: 20px;
    box-shadow: 0 20px 60px rgba(0,0,0,0.3);
    padding: 40px;
}
.header {
    text-align: center;
    margin-bottom: 40px;
    padding-bottom: 30px;
    border-bottom: 3px solid #667eea;
}
.header h1 { color: #667eea; font-size: 2.5em; margin-bottom: 10px; }
.header p { color: #666; font-size: 1.1em; }
.metrics-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 20px;
    margin-bottom: 40px;
}
.metric-card {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 25px;
    border-radius: 15px;
    text-align: center;
    box-shadow: 0 10px 30px rgba(102, 126, 234, 0.3);
}
.metric-value { font-size: 2.5em; font-weight: bold; margin-bottom: 10px; }
.metric-label {
    font-size: 0.9em;
    opacity: 0.9;
    text-transform: uppercase;
    letter-spacing: 1px;
}
.section { margin-bottom: 50px; }
.section h2 {
    color: #667eea;
    font-size: 1.8em;
    margin-bottom: 20px;
    padding-bottom: 10px;
    border-bottom: 2px solid #667eea;
}
.chart-container {
    background: #f8f9fa;
    padding: 20px;
    border-radius: 10px;
    margin-bottom: 30px;
    box-shadow: 0 5px 15px rgba(0,0,0,0.1);
}
.info-box {
    background: #e3f2fd;
    border-left: 4px solid #2196f3;
    padding: 20px;
    border-radius: 5px;
    margin-bottom: 30px;
}
.info-box h3 { color: #1976d2; margin-bottom: 15px; }
.info-box ul { list-style: none; padding-left: 0; }
.info-box li { padding: 8px 0; border-bottom: 1px solid #bbdefb; }
.info-box li:last-child { border-bottom: none; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; background: white; }
table th { background: #667eea; color: white; padding: 15px; text-align: left; font-weight: 600; }
table td { padding: 12px 15px; border-bottom: 1px solid #e0e0e0; }
table tr:hover { background: #f5f5f5; }
.footer {
    text-align: center;
    margin-top: 50px;
    padding-top: 30px;
    border-top: 2px solid #e0e0e0;
    color: #666;
}
@media print { body { background: white; } .container { box-shadow: none; } }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_reader;
    use chrono::TimeZone;

    fn table(csv: &str) -> Table {
        load_from_reader(csv.as_bytes()).unwrap().0
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn dashboard_embeds_every_section_and_the_timestamp() {
        let t = table(
            "Date,Company,Position,Status\n\
             2024-01-10,Acme,Engineer,Interview\n\
             2024-01-07,Globex,Analyst,Applied\n",
        );
        let m = MetricsSnapshot::compute(&t);
        let html = render_dashboard(&t, &m, now());
        for kind in ChartKind::ALL {
            assert!(html.contains(kind.section_title()));
        }
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("01/06/2024 12:30"));
        assert!(html.contains("01/06/2024 12:30:45"));
        assert!(html.contains("Top 10 Companies"));
        assert!(html.contains(r#"Plotly.newPlot("status_chart""#));
    }

    #[test]
    fn unavailable_charts_leave_empty_sections() {
        let t = table("Company\nAcme\n");
        let m = MetricsSnapshot::compute(&t);
        let html = render_dashboard(&t, &m, now());
        // The status section heading is present, its plot is not.
        assert!(html.contains(ChartKind::StatusDistribution.section_title()));
        assert!(!html.contains(r#"Plotly.newPlot("status_chart""#));
        assert!(html.contains(r#"Plotly.newPlot("company_chart""#));
    }

    #[test]
    fn excerpt_is_capped_at_one_hundred_rows() {
        let mut csv = String::from("Date,Company\n");
        for i in 0..150 {
            csv.push_str(&format!("2024-01-01,Company {i}\n"));
        }
        let t = table(&csv);
        let m = MetricsSnapshot::compute(&t);
        let html = render_dashboard(&t, &m, now());
        assert_eq!(html.matches("<tr>").count() - 1, 100); // minus header row
    }

    #[test]
    fn cell_text_is_escaped_and_links_rendered() {
        let t = table(
            "Date,Company,Status,Gmail Link\n\
             2024-01-10,<Acme & Sons>,Applied,https://mail.example/?id=1&x=2\n",
        );
        let m = MetricsSnapshot::compute(&t);
        let html = render_dashboard(&t, &m, now());
        assert!(html.contains("&lt;Acme &amp; Sons&gt;"));
        assert!(!html.contains("<Acme & Sons>"));
        assert!(html.contains(r#"<a href="https://mail.example/?id=1&amp;x=2">Open</a>"#));
    }

    #[test]
    fn renderer_never_fails_on_an_empty_table() {
        let t = table("Date,Company,Status\n");
        let m = MetricsSnapshot::compute(&t);
        let html = render_dashboard(&t, &m, now());
        assert!(html.contains("Job Application Dashboard"));
        assert!(!html.contains("Plotly.newPlot"));
    }
}
