use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::{Category, Icon};
use super::time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredTask")]
pub struct Task {
    /// Assigned at creation. Items persisted without one get a fresh id on load.
    pub id: Uuid,
    pub title: String,
    /// Time of day, `HH:MM`.
    pub hour: String,
    /// Category name at creation time. Not updated when the category changes.
    pub category: String,
    /// Color snapshot taken at creation (or a per-task override). Not live.
    pub color: String,
    /// Icon snapshot taken at creation. Absent for some stored items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub completed: bool,
}

/// A task as found on disk. Older items lack an `id`, and the completion flag
/// may be stored as `done`, `completed`, or both.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredTask {
    #[serde(default)]
    pub(crate) id: Option<Uuid>,
    title: String,
    hour: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    icon: Option<Icon>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    done: Option<bool>,
}

impl From<StoredTask> for Task {
    fn from(stored: StoredTask) -> Self {
        Self {
            id: stored.id.unwrap_or_else(Uuid::new_v4),
            title: stored.title,
            hour: stored.hour,
            category: stored.category,
            color: stored.color,
            icon: stored.icon,
            completed: stored.completed.or(stored.done).unwrap_or(false),
        }
    }
}

impl Task {
    pub fn new(title: impl Into<String>, hour: impl Into<String>, category: &Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            hour: hour.into(),
            category: category.name.clone(),
            color: category.color.clone(),
            icon: Some(category.icon),
            completed: false,
        }
    }

    pub fn minutes(&self) -> Option<u32> {
        time::minutes_since_midnight(&self.hour)
    }

    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// All tasks scheduled for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    /// `DD/MM/YYYY`
    pub date: String,
    #[serde(default)]
    pub items: Vec<Task>,
}

impl TaskGroup {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            items: Vec::new(),
        }
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        time::parse_date(&self.date)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|t| t.id == id)
    }
}

/// A task pulled out of its group, tagged with the group's date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedTask {
    pub date: String,
    #[serde(flatten)]
    pub task: Task,
}

impl DatedTask {
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        time::scheduled_at(&self.date, &self.task.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_snapshots_category() {
        let cat = Category::new("Work", Icon::Briefcase, "#3498db");
        let task = Task::new("Standup", "09:30", &cat);
        assert_eq!(task.category, "Work");
        assert_eq!(task.color, "#3498db");
        assert_eq!(task.icon, Some(Icon::Briefcase));
        assert!(!task.completed);
        assert_eq!(task.minutes(), Some(570));
    }

    #[test]
    fn reads_done_key_and_missing_id() {
        let json = r##"{"date":"10/01/2024","items":[
            {"title":"Pay rent","hour":"08:00","category":"Finance","color":"#f1c40f","done":true}
        ]}"##;
        let group: TaskGroup = serde_json::from_str(json).unwrap();
        let task = &group.items[0];
        assert!(task.completed);
        assert_eq!(task.icon, None);
        assert!(!task.id.is_nil());
    }

    #[test]
    fn writes_completed_key() {
        let cat = Category::new("Home", Icon::Home, "#2ecc71");
        let task = Task::new("Dishes", "20:00", &cat);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["completed"], false);
        assert!(json.get("done").is_none());
        assert_eq!(json["icon"], "home");
    }

    #[test]
    fn completed_wins_over_done_when_both_present() {
        let json = r##"{"title":"Gym","hour":"18:00","done":false,"completed":true}"##;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.completed);

        let json = r##"{"title":"Gym","hour":"18:00","done":true}"##;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.completed);
    }

    #[test]
    fn stored_id_is_kept() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{id}","title":"Gym","hour":"18:00"}}"#);
        let task: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task.id, id);
        assert!(!task.completed);
    }

    #[test]
    fn toggle_flips() {
        let cat = Category::new("Home", Icon::Home, "#2ecc71");
        let mut task = Task::new("Dishes", "20:00", &cat);
        assert!(task.toggle());
        assert!(!task.toggle());
    }
}
