// src/models/mod.rs

use serde::{Deserialize, Serialize};

// ───────────────────────────────────────
// Reference data: load catalog
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub load_id: String,
    pub origin: String,
    pub destination: String,
    pub pickup_datetime: String,  // YYYY-MM-DDTHH:MM:SS, parsed at sort time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadboard_rate: Option<f64>,
    /// Remaining carrier-facing attributes, returned as stored.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ───────────────────────────────────────
// Call outcome log (one JSON object per line)
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallOutcome {
    pub load_id: String,
    pub mc_number: String,
    pub booked: i64,                  // 0/1
    pub sentiment: String,
    #[serde(default)]
    pub original_rate: Option<i64>,   // cents
    #[serde(default)]
    pub final_rate: Option<i64>,      // cents
    pub transcript_summary: String,
}

impl CallOutcome {
    pub fn is_booked(&self) -> bool {
        self.booked == 1
    }

    /// Rate change from the opening quote to the agreed rate, in percent.
    /// `None` unless both rates are known and the original is positive.
    pub fn variance_pct(&self) -> Option<f64> {
        let original = self.original_rate.filter(|r| *r > 0)? as f64 / 100.0;
        let final_rate = self.final_rate? as f64 / 100.0;
        Some((final_rate - original) / original * 100.0)
    }

    /// Checks the parts serde can't express.
    pub fn validate(&self) -> Result<(), String> {
        if self.load_id.trim().is_empty() {
            return Err("load_id must not be empty".into());
        }
        if self.mc_number.trim().is_empty() {
            return Err("mc_number must not be empty".into());
        }
        if self.booked != 0 && self.booked != 1 {
            return Err(format!("booked must be 0 or 1, got {}", self.booked));
        }
        Ok(())
    }
}

// ───────────────────────────────────────
// DTOs helpful for endpoints
// ───────────────────────────────────────
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}
