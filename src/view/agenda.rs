use chrono::{NaiveDate, NaiveDateTime};

use crate::core::task::{DatedTask, Task, TaskGroup};
use crate::core::time;

/// Stable sort by minutes since midnight. Unparseable hours sort last.
pub fn sort_by_time_of_day(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.minutes().unwrap_or(u32::MAX));
}

/// Today's group, sorted by time.
pub fn today_tasks(groups: &[TaskGroup], today: NaiveDate) -> Vec<Task> {
    let date = time::format_date(today);
    let mut tasks = groups
        .iter()
        .find(|g| g.date == date)
        .map(|g| g.items.clone())
        .unwrap_or_default();
    sort_by_time_of_day(&mut tasks);
    tasks
}

/// "Today", "Tomorrow", or the weekday name for a group date.
pub fn day_label(date: &str, today: NaiveDate) -> String {
    match time::parse_date(date) {
        Some(d) if d == today => "Today".to_string(),
        Some(d) if Some(d) == today.succ_opt() => "Tomorrow".to_string(),
        Some(d) => d.format("%A").to_string(),
        None => date.to_string(),
    }
}

/// Tasks split around the current minute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agenda {
    /// At or after now, grouped by date ascending, each group sorted by time.
    pub upcoming: Vec<TaskGroup>,
    /// Before now, flattened and tagged with their date, in stored order.
    pub overdue: Vec<DatedTask>,
}

impl Agenda {
    pub fn build(groups: &[TaskGroup], now: NaiveDateTime) -> Self {
        let now = time::truncate_to_minute(now);
        let mut upcoming = Vec::new();
        let mut overdue = Vec::new();

        for group in groups {
            let mut future = Vec::new();
            for task in &group.items {
                // Tasks whose date or hour can't be read are never overdue.
                match time::scheduled_at(&group.date, &task.hour) {
                    Some(at) if at < now => overdue.push(DatedTask {
                        date: group.date.clone(),
                        task: task.clone(),
                    }),
                    _ => future.push(task.clone()),
                }
            }
            if !future.is_empty() {
                sort_by_time_of_day(&mut future);
                upcoming.push(TaskGroup {
                    date: group.date.clone(),
                    items: future,
                });
            }
        }

        upcoming.sort_by_key(|g| g.naive_date().unwrap_or(NaiveDate::MAX));

        Self { upcoming, overdue }
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.overdue.is_empty()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.iter().map(|g| g.items.len()).sum()
    }
}
