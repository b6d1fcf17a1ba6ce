use chrono::{Duration, NaiveDateTime};

use crate::core::task::{DatedTask, TaskGroup};
use crate::core::time;

pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

/// Incomplete tasks due after `now` and no more than `window` away. Drives
/// the periodically refreshed badge.
pub fn due_within_window(
    groups: &[TaskGroup],
    now: NaiveDateTime,
    window: Duration,
) -> Vec<DatedTask> {
    pending_after(groups, now, |at| at - now <= window)
}

/// Every incomplete task still ahead today. Shown when the notification
/// list is opened, with no look-ahead limit.
pub fn due_later_today(groups: &[TaskGroup], now: NaiveDateTime) -> Vec<DatedTask> {
    let today = now.date();
    pending_after(groups, now, |at| at.date() == today)
}

fn pending_after<F>(groups: &[TaskGroup], now: NaiveDateTime, keep: F) -> Vec<DatedTask>
where
    F: Fn(NaiveDateTime) -> bool,
{
    let mut due: Vec<(NaiveDateTime, DatedTask)> = groups
        .iter()
        .flat_map(|g| g.items.iter().map(move |t| (g, t)))
        .filter(|(_, t)| !t.completed)
        .filter_map(|(g, t)| {
            let at = time::scheduled_at(&g.date, &t.hour)?;
            (at > now && keep(at)).then(|| {
                (
                    at,
                    DatedTask {
                        date: g.date.clone(),
                        task: t.clone(),
                    },
                )
            })
        })
        .collect();
    due.sort_by_key(|(at, _)| *at);
    due.into_iter().map(|(_, t)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::{Category, Icon};
    use crate::core::task::Task;
    use chrono::NaiveDate;

    fn task(title: &str, hour: &str, completed: bool) -> Task {
        let mut t = Task::new(title, hour, &Category::new("Work", Icon::Briefcase, "#fff"));
        t.completed = completed;
        t
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    fn groups() -> Vec<TaskGroup> {
        vec![
            TaskGroup {
                date: "10/01/2024".into(),
                items: vec![
                    task("late", "15:01", false),
                    task("soon", "14:45", false),
                    task("done", "14:10", true),
                    task("edge", "15:00", false),
                    task("past", "13:00", false),
                    task("now", "14:00", false),
                ],
            },
            TaskGroup {
                date: "11/01/2024".into(),
                items: vec![task("tomorrow", "09:00", false)],
            },
        ]
    }

    fn titles(tasks: Vec<DatedTask>) -> Vec<String> {
        tasks.into_iter().map(|t| t.task.title).collect()
    }

    #[test]
    fn window_includes_up_to_sixty_minutes() {
        let due = due_within_window(&groups(), now(), Duration::minutes(DEFAULT_WINDOW_MINUTES));
        assert_eq!(titles(due), vec!["soon", "edge"]);
    }

    #[test]
    fn later_today_has_no_ceiling() {
        let due = due_later_today(&groups(), now());
        assert_eq!(titles(due), vec!["soon", "edge", "late"]);
    }

    #[test]
    fn window_crosses_midnight() {
        let groups = vec![TaskGroup {
            date: "11/01/2024".into(),
            items: vec![task("early", "00:10", false)],
        }];
        let late_night = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        assert_eq!(
            titles(due_within_window(&groups, late_night, Duration::minutes(60))),
            vec!["early"]
        );
        assert!(due_later_today(&groups, late_night).is_empty());
    }
}
