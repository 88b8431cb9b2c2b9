use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, TimeZone};

use crate::draw::{eligible_pool, winner_names};
use crate::models::{Department, Winner};
use crate::roster::Roster;

/// Per-department totals shown on the dashboard and analytics screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentStats {
    pub department: Department,
    pub total: usize,
    pub winners: usize,
    /// Share of the department that has won, rounded to a whole percent.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub total_contestants: usize,
    pub total_winners: usize,
    pub remaining_pool: usize,
    pub win_rate_percent: u32,
    pub departments: Vec<DepartmentStats>,
}

impl Overview {
    pub fn compute(roster: &Roster, winners: &[Winner]) -> Self {
        let remaining_pool = eligible_pool(roster.all_contestants(), &winner_names(winners)).len();
        Self {
            total_contestants: roster.len(),
            total_winners: winners.len(),
            remaining_pool,
            win_rate_percent: rounded_percent(winners.len(), roster.len()),
            departments: department_stats(roster, winners),
        }
    }
}

pub fn department_stats(roster: &Roster, winners: &[Winner]) -> Vec<DepartmentStats> {
    Department::ALL
        .iter()
        .map(|&department| {
            let total = roster.department_count(department);
            let won = winners
                .iter()
                .filter(|winner| winner.department == department)
                .count();
            DepartmentStats {
                department,
                total,
                winners: won,
                percentage: rounded_percent(won, total),
            }
        })
        .collect()
}

/// Department with the most winners. Ties go to the department listed first.
pub fn top_department(stats: &[DepartmentStats]) -> Option<&DepartmentStats> {
    let mut best: Option<&DepartmentStats> = None;
    for entry in stats {
        match best {
            Some(current) if current.winners >= entry.winners => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// The last `limit` winners, newest first.
pub fn recent_winners(winners: &[Winner], limit: usize) -> Vec<Winner> {
    winners.iter().rev().take(limit).cloned().collect()
}

/// Winner count per local calendar day, oldest day first, keeping only the
/// most recent `limit` days that had draws.
pub fn draws_by_date(winners: &[Winner], limit: usize) -> Vec<(NaiveDate, usize)> {
    draws_by_date_in(winners, &Local, limit)
}

pub fn draws_by_date_in<Tz: TimeZone>(
    winners: &[Winner],
    tz: &Tz,
    limit: usize,
) -> Vec<(NaiveDate, usize)> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for winner in winners {
        let day = winner.draw_date.with_timezone(tz).date_naive();
        *per_day.entry(day).or_insert(0) += 1;
    }

    let skip = per_day.len().saturating_sub(limit);
    per_day.into_iter().skip(skip).collect()
}

/// Average winners per day with draws, rounded; zero when nothing was drawn.
pub fn average_per_day(total_winners: usize, days_with_draws: usize) -> usize {
    if days_with_draws == 0 {
        return 0;
    }
    (total_winners as f64 / days_with_draws as f64).round() as usize
}

fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
