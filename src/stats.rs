use crate::models::{EntryKind, MonthlyStats, PlannerData, TodaySummary};
use crate::planner::day_key;
use chrono::{DateTime, Datelike, NaiveDate};

/// Monthly aggregates over the raw collections. Pure and read-only.
///
/// Health averages count every record in the month and treat an absent field
/// as 0, so sparse logging pulls the mean down.
pub fn monthly_stats(data: &PlannerData, year: i32, month: u32) -> MonthlyStats {
    let mut income = 0.0;
    let mut expense = 0.0;
    for entry in &data.wealth {
        let Ok(date) = DateTime::parse_from_rfc3339(&entry.date) else {
            continue;
        };
        if date.year() != year || date.month() != month {
            continue;
        }
        match entry.kind {
            EntryKind::Income => income += entry.amount,
            EntryKind::Expense => expense += entry.amount,
        }
    }

    let possible_slots = data.habits.len() as u32 * days_in_month(year, month);
    let completed_slots: u32 = data
        .habits
        .iter()
        .map(|habit| {
            habit
                .completed_days
                .iter()
                .filter(|day| in_month(day, year, month))
                .count() as u32
        })
        .sum();
    let habit_completion = if possible_slots == 0 {
        0
    } else {
        (100.0 * f64::from(completed_slots) / f64::from(possible_slots)).round() as u32
    };

    let month_records: Vec<_> = data
        .health
        .iter()
        .filter(|(day, _)| in_month(day, year, month))
        .map(|(_, record)| record)
        .collect();
    let (avg_sleep, avg_steps) = if month_records.is_empty() {
        (0.0, 0)
    } else {
        let count = month_records.len() as f64;
        let sleep_sum: f64 = month_records
            .iter()
            .map(|record| record.sleep_hours.unwrap_or(0.0))
            .sum();
        let step_sum: f64 = month_records
            .iter()
            .map(|record| f64::from(record.steps.unwrap_or(0)))
            .sum();
        (
            (sleep_sum / count * 10.0).round() / 10.0,
            (step_sum / count).round() as u32,
        )
    };

    MonthlyStats {
        year,
        month,
        income,
        expense,
        net: income - expense,
        habit_completion,
        avg_sleep,
        avg_steps,
    }
}

/// The dashboard numbers for one day: habits done today, today's health
/// fields, and the month's net cash flow.
pub fn today_summary(data: &PlannerData, today: NaiveDate) -> TodaySummary {
    let key = day_key(today);
    let habits_done = data
        .habits
        .iter()
        .filter(|habit| habit.completed_days.contains(&key))
        .count();
    let record = data.health.get(&key).cloned().unwrap_or_default();
    let month = monthly_stats(data, today.year(), today.month());

    TodaySummary {
        date: key,
        habits_done,
        habit_total: data.habits.len(),
        sleep_hours: record.sleep_hours.unwrap_or(0.0),
        water_intake: record.water_intake.unwrap_or(0.0),
        steps: record.steps.unwrap_or(0),
        month_net: month.net,
    }
}

/// Proleptic Gregorian day count, leap-year aware.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

fn in_month(day: &str, year: i32, month: u32) -> bool {
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|date| date.year() == year && date.month() == month)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthUpdate;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2026, 4), 30);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn completion_is_zero_without_habits() {
        let mut data = PlannerData::seed();
        data.habits.clear();
        let stats = monthly_stats(&data, 2026, 4);
        assert_eq!(stats.habit_completion, 0);
    }

    #[test]
    fn completion_counts_slots_in_month() {
        // Seed has 2 habits; April has 30 days, so 60 possible slots.
        let mut data = PlannerData::seed();
        let stats = monthly_stats(&data, 2026, 4);
        assert_eq!(stats.habit_completion, 0);

        let ids: Vec<String> = data.habits.iter().map(|h| h.id.clone()).collect();
        for id in &ids {
            assert!(data.toggle_habit_day(id, day(2026, 4, 10)));
        }
        // A completion outside the window must not count.
        assert!(data.toggle_habit_day(&ids[0], day(2026, 3, 10)));

        let stats = monthly_stats(&data, 2026, 4);
        assert_eq!(stats.habit_completion, 3); // round(100 * 2 / 60)
    }

    #[test]
    fn wealth_sums_split_by_kind() {
        let mut data = PlannerData::seed();
        data.add_wealth_entry("Salary", "Work", 1000.0).unwrap();
        data.add_wealth_entry("Rent", "Housing", -200.0).unwrap();

        let now = chrono::Utc::now();
        let stats = monthly_stats(&data, now.year(), now.month());
        assert_eq!(stats.income, 1000.0);
        assert_eq!(stats.expense, 200.0);
        assert_eq!(stats.net, 800.0);
    }

    #[test]
    fn wealth_outside_month_is_excluded() {
        let mut data = PlannerData::seed();
        let mut entry = data.add_wealth_entry("Salary", "Work", 1000.0).unwrap();
        entry.date = "2026-03-15T09:30:00+00:00".to_string();
        data.wealth[0] = entry;

        let stats = monthly_stats(&data, 2026, 4);
        assert_eq!(stats.income, 0.0);
        let stats = monthly_stats(&data, 2026, 3);
        assert_eq!(stats.income, 1000.0);
    }

    #[test]
    fn health_averages_count_missing_fields_as_zero() {
        let mut data = PlannerData::seed();
        let first = data.upsert_health_field(day(2026, 4, 1), HealthUpdate::SleepHours(7.0));
        assert_eq!(first.steps, None);
        data.upsert_health_field(day(2026, 4, 1), HealthUpdate::Steps(6000));
        data.upsert_health_field(day(2026, 4, 2), HealthUpdate::SleepHours(8.0));

        let stats = monthly_stats(&data, 2026, 4);
        assert_eq!(stats.avg_sleep, 7.5);
        // The second record has no steps, so it contributes 0 to the mean.
        assert_eq!(stats.avg_steps, 3000);
    }

    #[test]
    fn health_averages_default_to_zero_without_records() {
        let data = PlannerData::seed();
        let stats = monthly_stats(&data, 2026, 4);
        assert_eq!(stats.avg_sleep, 0.0);
        assert_eq!(stats.avg_steps, 0);
    }

    #[test]
    fn today_summary_reads_current_day() {
        let mut data = PlannerData::seed();
        let today = day(2026, 4, 10);
        let id = data.habits[0].id.clone();
        data.toggle_habit_day(&id, today);
        data.upsert_health_field(today, HealthUpdate::WaterIntake(2.5));

        let summary = today_summary(&data, today);
        assert_eq!(summary.date, "2026-04-10");
        assert_eq!(summary.habits_done, 1);
        assert_eq!(summary.habit_total, 2);
        assert_eq!(summary.water_intake, 2.5);
        assert_eq!(summary.sleep_hours, 0.0);
    }
}
