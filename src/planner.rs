use chrono::{Duration, NaiveDateTime};

use crate::core::category::{CATEGORY_COLORS, Category, CategoryStyle};
use crate::core::color::Rgb;
use crate::core::profile::{self, Landing};
use crate::core::task::{DatedTask, Task, TaskGroup};
use crate::error::{PlannerError, ValidationError};
use crate::message::Message;
use crate::store::profile::{load_user_name, save_user_name};
use crate::store::{CategoryStore, KeyValueStore, TaskStore};
use crate::view::{
    Agenda, CalendarCursor, MonthGrid, SearchFilter, due_later_today, due_within_window,
    notify::DEFAULT_WINDOW_MINUTES, today_tasks,
};

/// Single owner of application state.
///
/// Mutations only happen through [`Planner::update`]; everything the screens
/// show is recomputed from the stores on request.
pub struct Planner<S> {
    kv: S,
    categories: CategoryStore<S>,
    tasks: TaskStore<S>,
    window: Duration,
}

impl<S: KeyValueStore + Clone> Planner<S> {
    pub fn open(kv: S) -> Self {
        Self {
            categories: CategoryStore::load(kv.clone()),
            tasks: TaskStore::load(kv.clone()),
            kv,
            window: Duration::minutes(DEFAULT_WINDOW_MINUTES),
        }
    }

    pub fn with_notification_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn update(&mut self, message: Message, now: NaiveDateTime) -> Result<(), PlannerError> {
        match message {
            Message::AddTask(draft) => {
                let dated = draft.validate(now)?;
                let added_category = draft
                    .category
                    .as_ref()
                    .map_or(Ok(false), |c| self.categories.ensure(c));
                log::info!("Adding task '{}' on {}", dated.task.title, dated.date);
                let added_task = self.tasks.add_task(&dated.date, dated.task);
                added_category?;
                added_task?;
            }
            Message::ToggleTask { date, id } => {
                if self.tasks.toggle_completed(&date, id)?.is_none() {
                    log::warn!("No task {} on {} to toggle", id, date);
                }
            }
            Message::DeleteTask { date, id } => {
                if self.tasks.delete_task(&date, id)?.is_none() {
                    log::warn!("No task {} on {} to delete", id, date);
                }
            }
            Message::AddCategory { name, icon, color } => {
                let color = match color.trim() {
                    "" => CATEGORY_COLORS[0],
                    c if Rgb::from_hex(c).is_some() => c,
                    c => return Err(ValidationError::InvalidColor(c.to_string()).into()),
                };
                self.categories.add(&name, icon, color)?;
            }
            Message::RemoveCategory(name) => {
                let removed = self.categories.remove(&name)?;
                log::info!("Removed {} categories named '{}'", removed, name);
            }
            Message::SetUserName(name) => {
                let name = profile::validate_user_name(&name)?;
                save_user_name(&self.kv, &name)?;
            }
            Message::Reload => self.reload(),
        }
        Ok(())
    }

    /// Retry writing both collections after a failed save.
    pub fn persist(&self) -> Result<(), PlannerError> {
        self.categories.persist()?;
        self.tasks.persist()?;
        Ok(())
    }

    pub fn reload(&mut self) {
        self.categories.reload();
        self.tasks.reload();
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.list()
    }

    pub fn groups(&self) -> &[TaskGroup] {
        self.tasks.list_groups()
    }

    pub fn category_style(&self, task: &Task) -> CategoryStyle {
        let fallback = CategoryStyle {
            icon: task.icon.unwrap_or_default(),
            color: task.color.clone(),
        };
        self.categories.style_for(&task.category, &fallback)
    }

    pub fn agenda(&self, now: NaiveDateTime, filter: &SearchFilter) -> Agenda {
        let agenda = Agenda::build(self.groups(), now);
        Agenda {
            upcoming: filter.upcoming(&agenda.upcoming),
            overdue: filter.overdue(&agenda.overdue),
        }
    }

    pub fn today_tasks(&self, now: NaiveDateTime) -> Vec<Task> {
        today_tasks(self.groups(), now.date())
    }

    /// Badge contents: incomplete tasks due within the notification window.
    pub fn due_soon(&self, now: NaiveDateTime) -> Vec<DatedTask> {
        due_within_window(self.groups(), now, self.window)
    }

    /// Notification list contents: every incomplete task still ahead today.
    pub fn due_later_today(&self, now: NaiveDateTime) -> Vec<DatedTask> {
        due_later_today(self.groups(), now)
    }

    pub fn calendar(&self, cursor: &CalendarCursor) -> Option<MonthGrid> {
        cursor.grid(self.groups())
    }

    pub fn user_name(&self) -> Option<String> {
        load_user_name(&self.kv)
    }

    pub fn landing(&self) -> Landing {
        Landing::for_user(self.user_name().as_deref())
    }

    pub fn header_title(&self) -> String {
        profile::header_title(self.user_name().as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::Icon;
    use crate::core::draft::TaskDraft;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn draft(title: &str, date: &str, hour: &str, category: Category) -> Message {
        Message::AddTask(TaskDraft::new(title, date, hour).with_category(category))
    }

    #[test]
    fn add_toggle_delete_flow() {
        let kv = MemoryStore::default();
        let mut planner = Planner::open(kv.clone());
        let work = planner.categories()[1].clone();

        planner
            .update(draft("Standup", "10/01/2024", "10:30", work.clone()), now())
            .unwrap();
        planner
            .update(draft("Lunch", "10/01/2024", "12:00", work), now())
            .unwrap();
        let id = planner.groups()[0].items[0].id;

        planner
            .update(
                Message::ToggleTask {
                    date: "10/01/2024".into(),
                    id,
                },
                now(),
            )
            .unwrap();

        let agenda = planner.agenda(now(), &SearchFilter::default().hide_completed(true));
        assert_eq!(agenda.upcoming_count(), 1);
        assert_eq!(agenda.upcoming[0].items[0].title, "Lunch");

        planner
            .update(
                Message::DeleteTask {
                    date: "10/01/2024".into(),
                    id,
                },
                now(),
            )
            .unwrap();

        let fresh = Planner::open(kv);
        assert_eq!(fresh.groups()[0].items.len(), 1);
    }

    #[test]
    fn invalid_draft_changes_nothing() {
        let mut planner = Planner::open(MemoryStore::default());
        let gym = Category::new("Gym", Icon::Heart, "#111");
        let err = planner
            .update(draft("Run", "10/01/2024", "09:00", gym), now())
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Invalid(ValidationError::InPast { .. })
        ));
        assert!(planner.groups().is_empty());
        assert_eq!(planner.categories().len(), 4);
    }

    #[test]
    fn new_category_is_created_with_task() {
        let mut planner = Planner::open(MemoryStore::default());
        let gym = Category::new("Gym", Icon::Heart, "#111");
        planner
            .update(draft("Run", "11/01/2024", "07:00", gym), now())
            .unwrap();
        assert_eq!(planner.categories().len(), 5);
        assert_eq!(planner.categories()[4].name, "Gym");
    }

    #[test]
    fn removed_category_falls_back_to_task_snapshot() {
        let mut planner = Planner::open(MemoryStore::default());
        let health = planner.categories()[0].clone();
        planner
            .update(draft("Doctor", "11/01/2024", "09:00", health), now())
            .unwrap();
        planner
            .update(Message::RemoveCategory("Health".into()), now())
            .unwrap();

        let task = planner.groups()[0].items[0].clone();
        assert_eq!(task.category, "Health");
        let style = planner.category_style(&task);
        assert_eq!(style.icon, Icon::Heart);
        assert_eq!(style.color, "#e74c3c");
    }

    #[test]
    fn add_category_checks_color() {
        let mut planner = Planner::open(MemoryStore::default());
        let add = |color: &str| Message::AddCategory {
            name: "Gym".into(),
            icon: Icon::Heart,
            color: color.into(),
        };
        let err = planner.update(add("red"), now()).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Invalid(ValidationError::InvalidColor(_))
        ));
        assert_eq!(planner.categories().len(), 4);

        planner.update(add(""), now()).unwrap();
        planner.update(add(" #abc "), now()).unwrap();
        assert_eq!(planner.categories()[4].color, CATEGORY_COLORS[0]);
        assert_eq!(planner.categories()[5].color, "#abc");
    }

    #[test]
    fn user_name_drives_landing() {
        let mut planner = Planner::open(MemoryStore::default());
        assert_eq!(planner.landing(), Landing::Welcome);
        assert!(
            planner
                .update(Message::SetUserName("Maximilian".into()), now())
                .is_err()
        );
        planner
            .update(Message::SetUserName("Ana".into()), now())
            .unwrap();
        assert_eq!(planner.landing(), Landing::Home);
        assert_eq!(planner.header_title(), "Tasks for Ana");
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let kv = MemoryStore::default();
        let mut planner = Planner::open(kv.clone());
        let mut other = Planner::open(kv);
        let home = other.categories()[2].clone();
        other
            .update(draft("Laundry", "10/01/2024", "18:00", home), now())
            .unwrap();

        assert!(planner.groups().is_empty());
        planner.update(Message::Reload, now()).unwrap();
        assert_eq!(planner.today_tasks(now()).len(), 1);
    }

    #[test]
    fn due_soon_uses_configured_window() {
        let mut planner =
            Planner::open(MemoryStore::default()).with_notification_window(Duration::minutes(15));
        let work = planner.categories()[1].clone();
        planner
            .update(draft("Call", "10/01/2024", "10:10", work.clone()), now())
            .unwrap();
        planner
            .update(draft("Email", "10/01/2024", "10:30", work), now())
            .unwrap();

        assert_eq!(planner.due_soon(now()).len(), 1);
        assert_eq!(planner.due_later_today(now()).len(), 2);
    }
}
