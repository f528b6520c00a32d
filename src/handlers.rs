use crate::errors::AppError;
use crate::models::{
    Changed, DayHealth, Habit, HealthUpdate, MonthlyStats, NewHabitRequest, NewWealthRequest,
    PlannerData, StatsQuery, TodaySummary, ToggleHabitRequest, WealthEntry,
};
use crate::state::AppState;
use crate::stats::{monthly_stats, today_summary};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{Datelike, Local, NaiveDate};

pub async fn index() -> Html<String> {
    Html(render_index(&today_string()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<PlannerData> {
    let data = state.data.lock().await;
    Json(data.clone())
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodaySummary> {
    let data = state.data.lock().await;
    Json(today_summary(&data, Local::now().date_naive()))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<MonthlyStats>, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }

    let data = state.data.lock().await;
    Ok(Json(monthly_stats(&data, year, month)))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<Json<Habit>, AppError> {
    let mut data = state.data.lock().await;
    let habit = data.add_habit(&payload.name, &payload.category)?;
    commit(&state, &mut data).await;
    Ok(Json(habit))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleHabitRequest>,
) -> Result<Json<Changed>, AppError> {
    let date = parse_day(&payload.date)?;
    let mut data = state.data.lock().await;
    let changed = data.toggle_habit_day(&id, date);
    if changed {
        commit(&state, &mut data).await;
    }
    Ok(Json(Changed { changed }))
}

pub async fn remove_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Changed> {
    let mut data = state.data.lock().await;
    let changed = data.remove_habit(&id);
    if changed {
        commit(&state, &mut data).await;
    }
    Json(Changed { changed })
}

pub async fn update_health(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<HealthUpdate>,
) -> Result<Json<DayHealth>, AppError> {
    let date = parse_day(&date)?;
    let update = clamp_update(payload);
    let mut data = state.data.lock().await;
    let record = data.upsert_health_field(date, update);
    commit(&state, &mut data).await;
    Ok(Json(record))
}

pub async fn add_wealth(
    State(state): State<AppState>,
    Json(payload): Json<NewWealthRequest>,
) -> Result<Json<WealthEntry>, AppError> {
    let mut data = state.data.lock().await;
    let entry = data.add_wealth_entry(&payload.description, &payload.category, payload.amount)?;
    commit(&state, &mut data).await;
    Ok(Json(entry))
}

pub async fn remove_wealth(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Changed> {
    let mut data = state.data.lock().await;
    let changed = data.remove_wealth_entry(&id);
    if changed {
        commit(&state, &mut data).await;
    }
    Json(Changed { changed })
}

/// Every committed mutation refreshes `lastSaved` and writes the whole state
/// exactly once.
async fn commit(state: &AppState, data: &mut PlannerData) {
    data.touch();
    persist_data(&state.data_path, data).await;
}

fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))
}

/// Input-layer range clamp and granularity snap. The store itself does not
/// re-validate, so every write has to pass through here.
fn clamp_update(update: HealthUpdate) -> HealthUpdate {
    match update {
        HealthUpdate::Weight(value) => HealthUpdate::Weight(snap(value, 300.0, 0.5)),
        HealthUpdate::SleepHours(value) => HealthUpdate::SleepHours(snap(value, 12.0, 0.5)),
        HealthUpdate::WaterIntake(value) => HealthUpdate::WaterIntake(snap(value, 8.0, 0.5)),
        HealthUpdate::Steps(value) => HealthUpdate::Steps(snap_steps(value)),
        HealthUpdate::Notes(value) => HealthUpdate::Notes(value),
    }
}

fn snap(value: f64, max: f64, step: f64) -> f64 {
    (value.clamp(0.0, max) / step).round() * step
}

fn snap_steps(value: u32) -> u32 {
    let snapped = ((f64::from(value.min(20_000)) / 500.0).round() as u32) * 500;
    snapped.min(20_000)
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_clamps_and_rounds_to_step() {
        assert_eq!(snap(7.3, 12.0, 0.5), 7.5);
        assert_eq!(snap(25.0, 12.0, 0.5), 12.0);
        assert_eq!(snap(-3.0, 8.0, 0.5), 0.0);
    }

    #[test]
    fn steps_snap_to_device_granularity() {
        assert_eq!(snap_steps(4210), 4000);
        assert_eq!(snap_steps(4260), 4500);
        assert_eq!(snap_steps(90_000), 20_000);
    }
}
