use crate::core::task::{DatedTask, Task, TaskGroup};

/// Search box text plus the "hide completed" toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub text: String,
    pub hide_completed: bool,
}

impl SearchFilter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hide_completed: false,
        }
    }

    pub fn hide_completed(mut self, hide: bool) -> Self {
        self.hide_completed = hide;
        self
    }

    /// Case-insensitive substring match on title or category.
    pub fn matches_text(&self, task: &Task) -> bool {
        let needle = self.text.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.category.to_lowercase().contains(&needle)
    }

    /// Apply text and completion filters to grouped tasks; groups left empty
    /// are dropped.
    pub fn upcoming(&self, groups: &[TaskGroup]) -> Vec<TaskGroup> {
        groups
            .iter()
            .map(|g| TaskGroup {
                date: g.date.clone(),
                items: g
                    .items
                    .iter()
                    .filter(|t| self.matches_text(t) && !(self.hide_completed && t.completed))
                    .cloned()
                    .collect(),
            })
            .filter(|g| !g.items.is_empty())
            .collect()
    }

    /// Text filter only; overdue tasks stay visible whether done or not.
    pub fn overdue(&self, tasks: &[DatedTask]) -> Vec<DatedTask> {
        tasks
            .iter()
            .filter(|t| self.matches_text(&t.task))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::{Category, Icon};

    fn task(title: &str, category: &str, completed: bool) -> Task {
        let mut t = Task::new(title, "09:00", &Category::new(category, Icon::Star, "#fff"));
        t.completed = completed;
        t
    }

    fn groups() -> Vec<TaskGroup> {
        vec![
            TaskGroup {
                date: "10/01/2024".into(),
                items: vec![
                    task("Buy milk", "Home", false),
                    task("Report", "Work", true),
                ],
            },
            TaskGroup {
                date: "11/01/2024".into(),
                items: vec![task("Gym", "Health", false)],
            },
        ]
    }

    #[test]
    fn empty_text_is_identity() {
        let groups = groups();
        assert_eq!(SearchFilter::default().upcoming(&groups), groups);
    }

    #[test]
    fn matches_title_or_category_case_insensitively() {
        let result = SearchFilter::new("WORK").upcoming(&groups());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].items[0].title, "Report");

        let result = SearchFilter::new("milk").upcoming(&groups());
        assert_eq!(result[0].items[0].title, "Buy milk");
    }

    #[test]
    fn filtering_twice_equals_once() {
        let filter = SearchFilter::new("m");
        let once = filter.upcoming(&groups());
        assert_eq!(filter.upcoming(&once), once);
    }

    #[test]
    fn hide_completed_only_affects_upcoming() {
        let filter = SearchFilter::new("").hide_completed(true);
        let result = filter.upcoming(&groups());
        assert!(result.iter().flat_map(|g| &g.items).all(|t| !t.completed));

        let overdue = vec![DatedTask {
            date: "09/01/2024".into(),
            task: task("Report", "Work", true),
        }];
        assert_eq!(filter.overdue(&overdue), overdue);
        assert!(SearchFilter::new("gym").overdue(&overdue).is_empty());
    }
}
