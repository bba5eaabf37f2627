// src/render/mod.rs
//
// Self-contained HTML dashboard. Everything shown is derived from the KPI
// struct and the filtered rows; colour tiers here never feed back into numbers.

use serde_json::json;

use crate::kpi::{DashboardFilter, DashboardKpis, Sentiment};
use crate::models::CallOutcome;

pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceTier {
    Red,
    Amber,
    Green,
}

impl VarianceTier {
    pub fn for_pct(pct: f64) -> Self {
        if pct > 15.0 {
            VarianceTier::Red
        } else if pct > 0.0 {
            VarianceTier::Amber
        } else {
            VarianceTier::Green
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            VarianceTier::Red => "var-red",
            VarianceTier::Amber => "var-amber",
            VarianceTier::Green => "var-green",
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `123456` cents → `$1,234.56`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", abs % 100)
}

fn format_rate(rate: Option<i64>) -> String {
    rate.map(format_cents).unwrap_or_else(|| "—".into())
}

/// Data handed to the inline Chart.js script.
pub fn chart_payload(kpis: &DashboardKpis) -> serde_json::Value {
    let labels: Vec<String> = kpis
        .sentiment_counts
        .keys()
        .map(|k| format!("{} {}", Sentiment::from_label(k).icon(), k))
        .collect();
    let counts: Vec<usize> = kpis.sentiment_counts.values().copied().collect();
    json!({ "labels": labels, "counts": counts })
}

fn script_safe_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn render_row(c: &CallOutcome) -> String {
    let badge = if c.is_booked() {
        r#"<span class="badge booked">BOOKED</span>"#
    } else {
        r#"<span class="badge lost">LOST</span>"#
    };
    let variance = match c.variance_pct() {
        Some(pct) => format!(
            r#"<span class="{}">{:+.1}%</span>"#,
            VarianceTier::for_pct(pct).css_class(),
            pct
        ),
        None => r#"<span class="muted">N/A</span>"#.to_string(),
    };
    let sentiment = Sentiment::from_label(&c.sentiment);
    let summary = escape_html(&c.transcript_summary);

    format!(
        r#"<tr>
  <td>{load}</td>
  <td>{carrier}</td>
  <td>{badge}</td>
  <td>{orig}</td>
  <td>{fin}</td>
  <td>{variance}</td>
  <td>{icon} {label}</td>
  <td class="summary" title="{summary}">{summary}</td>
</tr>
"#,
        load = escape_html(&c.load_id),
        carrier = escape_html(&c.mc_number),
        orig = format_rate(c.original_rate),
        fin = format_rate(c.final_rate),
        icon = sentiment.icon(),
        label = escape_html(&c.sentiment),
    )
}

fn kpi_card(title: &str, value: String) -> String {
    format!(
        r#"<div class="card"><div class="card-title">{title}</div><div class="card-value">{value}</div></div>"#
    )
}

fn filter_form(filter: &DashboardFilter, api_key: Option<&str>) -> String {
    let status = filter.booked_status();
    let selected = |v: Option<i64>| if status == v { " selected" } else { "" };
    let key_field = api_key
        .map(|k| {
            format!(
                r#"<input type="hidden" name="api_key_query" value="{}">"#,
                escape_html(k)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<form class="filters" method="get" action="/dashboard">
  <select name="status">
    <option value=""{all}>All calls</option>
    <option value="1"{booked}>Booked</option>
    <option value="0"{lost}>Lost</option>
  </select>
  <input type="text" name="search_id" placeholder="Load ID" value="{search}">
  {key_field}
  <button type="submit">Filter</button>
</form>"#,
        all = selected(None),
        booked = selected(Some(1)),
        lost = selected(Some(0)),
        search = escape_html(filter.search_id.as_deref().unwrap_or("")),
    )
}

pub fn render_dashboard(
    kpis: &DashboardKpis,
    rows: &[CallOutcome],
    filter: &DashboardFilter,
    api_key: Option<&str>,
) -> String {
    let cards = [
        kpi_card("Total calls", kpis.total_calls.to_string()),
        kpi_card("Booking rate", format!("{:.1}%", kpis.booking_rate)),
        kpi_card("Avg negotiation", format!("{:+.1}%", kpis.avg_negotiation_pct)),
        kpi_card("Calls per load", format!("{:.2}", kpis.avg_calls_per_load)),
        kpi_card("Calls to close", format!("{:.2}", kpis.avg_calls_to_close)),
        kpi_card("Booked loads per carrier", format!("{:.2}", kpis.avg_loads_per_carrier)),
    ]
    .join("\n");

    let table_rows: String = if rows.is_empty() {
        r#"<tr><td colspan="8" class="muted">No calls recorded</td></tr>"#.to_string()
    } else {
        rows.iter().map(render_row).collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Carrier Sales Dashboard</title>
<script src="{chart_url}"></script>
<style>
  body {{ font-family: system-ui, sans-serif; margin: 2rem; background: #f6f7f9; color: #1d2430; }}
  .cards {{ display: flex; flex-wrap: wrap; gap: 1rem; margin-bottom: 1.5rem; }}
  .card {{ background: #fff; border-radius: 8px; padding: 1rem 1.25rem; min-width: 160px; box-shadow: 0 1px 3px rgba(0,0,0,.08); }}
  .card-title {{ font-size: .8rem; text-transform: uppercase; color: #6b7280; }}
  .card-value {{ font-size: 1.6rem; font-weight: 600; }}
  table {{ width: 100%; border-collapse: collapse; background: #fff; }}
  th, td {{ padding: .5rem .75rem; border-bottom: 1px solid #e5e7eb; text-align: left; }}
  td.summary {{ max-width: 320px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }}
  .badge {{ padding: 2px 8px; border-radius: 10px; font-size: .75rem; font-weight: 600; }}
  .badge.booked {{ background: #dcfce7; color: #166534; }}
  .badge.lost {{ background: #fee2e2; color: #991b1b; }}
  .var-red {{ color: #dc2626; font-weight: 600; }}
  .var-amber {{ color: #d97706; font-weight: 600; }}
  .var-green {{ color: #16a34a; font-weight: 600; }}
  .muted {{ color: #9ca3af; }}
  .chart {{ max-width: 420px; margin-bottom: 1.5rem; }}
  .filters {{ margin-bottom: 1rem; display: flex; gap: .5rem; }}
</style>
</head>
<body>
<h1>Carrier Sales Dashboard</h1>
{form}
<div class="cards">
{cards}
</div>
<div class="chart"><canvas id="sentimentChart"></canvas></div>
<table>
<thead>
<tr><th>Load</th><th>MC</th><th>Outcome</th><th>Original</th><th>Final</th><th>Variance</th><th>Sentiment</th><th>Summary</th></tr>
</thead>
<tbody>
{table_rows}</tbody>
</table>
<script>
const chartData = {payload};
new Chart(document.getElementById("sentimentChart"), {{
  type: "doughnut",
  data: {{
    labels: chartData.labels,
    datasets: [{{ data: chartData.counts }}]
  }}
}});
</script>
</body>
</html>
"#,
        chart_url = CHART_JS_URL,
        form = filter_form(filter, api_key),
        payload = script_safe_json(&chart_payload(kpis)),
    )
}
