use crate::errors::ValidationError;
use crate::models::{DayHealth, EntryKind, Habit, HealthUpdate, PlannerData, WealthEntry};
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

pub const DEFAULT_CATEGORY: &str = "General";

impl PlannerData {
    /// The state used when nothing valid is persisted yet: two starter habits,
    /// no health or wealth records. Habit ids are fixed so the seed is
    /// deterministic.
    pub fn seed() -> Self {
        Self {
            habits: vec![
                starter_habit("1", "Morning Meditation", "Mindset"),
                starter_habit("2", "Strategic Planning", "Work"),
            ],
            health: BTreeMap::new(),
            wealth: Vec::new(),
            last_saved: Utc::now().to_rfc3339(),
        }
    }

    pub fn add_habit(&mut self, name: &str, category: &str) -> Result<Habit, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyHabitName);
        }
        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            completed_days: BTreeSet::new(),
            category: category_or_default(category),
        };
        self.habits.push(habit.clone());
        Ok(habit)
    }

    /// Flips membership of `date` in the habit's completed set. Toggling the
    /// same date twice restores the prior set. Unknown ids are a no-op.
    pub fn toggle_habit_day(&mut self, id: &str, date: NaiveDate) -> bool {
        let key = day_key(date);
        match self.habits.iter_mut().find(|habit| habit.id == id) {
            Some(habit) => {
                if !habit.completed_days.remove(&key) {
                    habit.completed_days.insert(key);
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_habit(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        self.habits.len() != before
    }

    /// Writes one field of the record for `date`, creating the record if the
    /// date has none yet. Other fields are left untouched. The value is
    /// expected to be clamped by the input layer already; no range check here.
    pub fn upsert_health_field(&mut self, date: NaiveDate, update: HealthUpdate) -> DayHealth {
        let record = self.health.entry(day_key(date)).or_default();
        match update {
            HealthUpdate::Weight(value) => record.weight = Some(value),
            HealthUpdate::SleepHours(value) => record.sleep_hours = Some(value),
            HealthUpdate::WaterIntake(value) => record.water_intake = Some(value),
            HealthUpdate::Steps(value) => record.steps = Some(value),
            HealthUpdate::Notes(value) => record.notes = Some(value),
        }
        record.clone()
    }

    /// Inserts at the front of the ledger. The sign of `signed_amount` decides
    /// income vs expense; the stored amount is its absolute value.
    pub fn add_wealth_entry(
        &mut self,
        description: &str,
        category: &str,
        signed_amount: f64,
    ) -> Result<WealthEntry, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if signed_amount.is_nan() || signed_amount == 0.0 {
            return Err(ValidationError::BadAmount);
        }
        let entry = WealthEntry {
            id: Uuid::new_v4().to_string(),
            date: Utc::now().to_rfc3339(),
            kind: if signed_amount > 0.0 {
                EntryKind::Income
            } else {
                EntryKind::Expense
            },
            amount: signed_amount.abs(),
            description: description.to_string(),
            category: category_or_default(category),
        };
        self.wealth.insert(0, entry.clone());
        Ok(entry)
    }

    pub fn remove_wealth_entry(&mut self, id: &str) -> bool {
        let before = self.wealth.len();
        self.wealth.retain(|entry| entry.id != id);
        self.wealth.len() != before
    }

    pub fn touch(&mut self) {
        self.last_saved = Utc::now().to_rfc3339();
    }
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn category_or_default(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

fn starter_habit(id: &str, name: &str, category: &str) -> Habit {
    Habit {
        id: id.to_string(),
        name: name.to_string(),
        completed_days: BTreeSet::new(),
        category: category.to_string(),
    }
}
