//! Point aggregations for the dashboard, calendar and analytics views.

use chrono::{Duration, NaiveDate};

use crate::models::{Category, Task};
use crate::utils::datetime;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Points earned on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPoints {
    pub label: &'static str,
    pub day: NaiveDate,
    pub points: u64,
}

/// Lifetime points earned in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPoints {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub points: u64,
}

/// Sum of points of the tasks completed on `day`.
///
/// A task counts once per day no matter how many entries it has for it.
pub fn points_for_day(tasks: &[Task], day: NaiveDate) -> u64 {
    tasks
        .iter()
        .filter(|t| t.is_completed_on(day))
        .map(|t| u64::from(t.points))
        .sum()
}

/// Points for each day of the Sunday-to-Saturday week containing `today`.
pub fn weekly_points(tasks: &[Task], today: NaiveDate) -> Vec<DayPoints> {
    let start = datetime::start_of_week(today);
    WEEKDAY_LABELS
        .iter()
        .enumerate()
        .map(|(offset, &label)| {
            let day = start + Duration::days(offset as i64);
            DayPoints {
                label,
                day,
                points: points_for_day(tasks, day),
            }
        })
        .collect()
}

/// Points per category over every completion entry, skipping empty categories.
pub fn category_distribution(tasks: &[Task], categories: &[Category]) -> Vec<CategoryPoints> {
    categories
        .iter()
        .map(|category| {
            let points = tasks
                .iter()
                .filter(|t| t.category_id == category.id)
                .map(|t| t.completed_dates.len() as u64 * u64::from(t.points))
                .sum();
            CategoryPoints {
                category_id: category.id.clone(),
                name: category.name.clone(),
                color: category.color.clone(),
                points,
            }
        })
        .filter(|entry| entry.points > 0)
        .collect()
}
