use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A recurring daily task, tracked by which calendar dates it was done on.
/// `completed_days` holds `YYYY-MM-DD` strings; set membership keeps toggles
/// idempotent per date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub completed_days: BTreeSet<String>,
    pub category: String,
}

/// Wellness measurements for one calendar date. Every field is independently
/// optional; the owning map is keyed by the date string.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayHealth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

/// One financial transaction. `amount` is always positive; the sign the user
/// entered lives in `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WealthEntry {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: f64,
    pub description: String,
    pub category: String,
}

/// The whole persisted application state, serialized as one JSON blob.
/// `wealth` is kept newest-first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerData {
    pub habits: Vec<Habit>,
    pub health: BTreeMap<String, DayHealth>,
    pub wealth: Vec<WealthEntry>,
    pub last_saved: String,
}

/// A single-field write to one day's health record, e.g.
/// `{"field": "sleepHours", "value": 7.5}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum HealthUpdate {
    Weight(f64),
    SleepHours(f64),
    WaterIntake(f64),
    Steps(u32),
    Notes(String),
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleHabitRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct NewWealthRequest {
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Changed {
    pub changed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub date: String,
    pub habits_done: usize,
    pub habit_total: usize,
    pub sleep_hours: f64,
    pub water_intake: f64,
    pub steps: u32,
    pub month_net: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub habit_completion: u32,
    pub avg_sleep: f64,
    pub avg_steps: u32,
}
