use chrono::{Duration, NaiveDate};

use crate::domain::ticket::{Priority, Ticket};

/// Trailing window used for the created-per-day series, today included.
pub const DAILY_WINDOW: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Figures for the metrics tab, always computed over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub total: usize,
    pub resolved: usize,
    pub by_priority: [(Priority, usize); 4],
    /// `None` when no ticket carries a resolution time.
    pub average_resolution_minutes: Option<i64>,
    pub created_per_day: Vec<DailyCount>,
    /// Rounded percentage of finished tickets; `0` for an empty collection.
    pub resolution_rate: u32,
}

impl Metrics {
    pub fn compute(tickets: &[Ticket], today: NaiveDate) -> Self {
        let by_priority = Priority::ALL.map(|priority| {
            let count = tickets
                .iter()
                .filter(|ticket| ticket.priority == priority)
                .count();
            (priority, count)
        });

        let resolved = tickets
            .iter()
            .filter(|ticket| ticket.status.is_finished())
            .count();

        Self {
            total: tickets.len(),
            resolved,
            by_priority,
            average_resolution_minutes: average_resolution(tickets),
            created_per_day: created_per_day(tickets, today),
            resolution_rate: percentage(resolved, tickets.len()),
        }
    }

    pub fn average_resolution_label(&self) -> String {
        match self.average_resolution_minutes {
            Some(minutes) => format!("{minutes} min"),
            None => "N/A".to_string(),
        }
    }
}

fn average_resolution(tickets: &[Ticket]) -> Option<i64> {
    let times: Vec<i64> = tickets
        .iter()
        .filter_map(|ticket| ticket.resolution_time_minutes)
        .collect();
    if times.is_empty() {
        return None;
    }
    let sum: i64 = times.iter().sum();
    Some((sum as f64 / times.len() as f64).round() as i64)
}

fn created_per_day(tickets: &[Ticket], today: NaiveDate) -> Vec<DailyCount> {
    (0..DAILY_WINDOW)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let prefix = day.format("%Y-%m-%d").to_string();
            let count = tickets
                .iter()
                .filter(|ticket| {
                    ticket
                        .created_at
                        .as_deref()
                        .is_some_and(|created| created.starts_with(&prefix))
                })
                .count();
            DailyCount { day, count }
        })
        .collect()
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}
