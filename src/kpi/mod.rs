// src/kpi/mod.rs
//
// Dashboard aggregation over the call-outcome log. Filters are applied first;
// every figure below is computed on the filtered set only.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::CallOutcome;

// ─────────────────────────────────────────────────────────────────────────────
// Filters
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    /// Exact booked flag; non-numeric values are ignored.
    pub status: Option<String>,
    /// Case-insensitive substring of the load id.
    pub search_id: Option<String>,
}

impl DashboardFilter {
    pub fn booked_status(&self) -> Option<i64> {
        self.status.as_deref().and_then(|s| s.trim().parse().ok())
    }

    pub fn apply(&self, log: Vec<CallOutcome>) -> Vec<CallOutcome> {
        let status = self.booked_status();
        let needle = self
            .search_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        log.into_iter()
            .filter(|c| status.map_or(true, |s| c.booked == s))
            .filter(|c| {
                needle
                    .as_deref()
                    .map_or(true, |n| c.load_id.to_lowercase().contains(n))
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sentiment
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "happy" | "satisfied" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" | "frustrated" | "angry" => Sentiment::Negative,
            _ => Sentiment::Unknown,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Neutral => "😐",
            Sentiment::Negative => "😠",
            Sentiment::Unknown => "❓",
        }
    }
}

/// Histogram key for a raw label. Unmapped labels keep their own key.
pub fn sentiment_key(label: &str) -> String {
    label.to_lowercase()
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregates
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub total_calls: usize,
    pub booked_calls: usize,
    /// Percent of filtered calls with booked=1.
    pub booking_rate: f64,
    /// Mean rate change (percent) over booked calls with a positive original rate.
    pub avg_negotiation_pct: f64,
    pub avg_calls_per_load: f64,
    /// Mean number of calls sharing a booked call's (load, carrier) pair.
    pub avg_calls_to_close: f64,
    pub avg_loads_per_carrier: f64,
    pub sentiment_counts: BTreeMap<String, usize>,
}

fn ratio(num: f64, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num / den as f64
    }
}

pub fn compute(entries: &[CallOutcome]) -> DashboardKpis {
    let total = entries.len();
    let booked: Vec<&CallOutcome> = entries.iter().filter(|c| c.is_booked()).collect();

    let variances: Vec<f64> = booked.iter().filter_map(|c| c.variance_pct()).collect();

    let unique_loads: HashSet<&str> = entries.iter().map(|c| c.load_id.as_str()).collect();
    let unique_carriers: HashSet<&str> = entries.iter().map(|c| c.mc_number.as_str()).collect();

    let mut calls_per_pair: HashMap<(&str, &str), usize> = HashMap::new();
    for c in entries {
        *calls_per_pair
            .entry((c.load_id.as_str(), c.mc_number.as_str()))
            .or_default() += 1;
    }
    // one sample per booked entry, not per pair
    let calls_to_close: usize = booked
        .iter()
        .map(|c| calls_per_pair[&(c.load_id.as_str(), c.mc_number.as_str())])
        .sum();

    let mut sentiment_counts: BTreeMap<String, usize> = BTreeMap::new();
    for c in entries {
        *sentiment_counts.entry(sentiment_key(&c.sentiment)).or_default() += 1;
    }

    DashboardKpis {
        total_calls: total,
        booked_calls: booked.len(),
        booking_rate: ratio(booked.len() as f64 * 100.0, total),
        avg_negotiation_pct: ratio(variances.iter().sum(), variances.len()),
        avg_calls_per_load: ratio(total as f64, unique_loads.len()),
        avg_calls_to_close: ratio(calls_to_close as f64, booked.len()),
        avg_loads_per_carrier: ratio(booked.len() as f64, unique_carriers.len()),
        sentiment_counts,
    }
}
