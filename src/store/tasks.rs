use serde::Deserialize;
use uuid::Uuid;

use super::{KeyValueStore, TASKS_KEY, read_json, write_json};
use crate::core::task::{StoredTask, Task, TaskGroup};
use crate::error::StoreError;

/// Owns the task collection: one group per date, no empty groups.
///
/// Every mutation re-reads the stored collection, applies the change and
/// writes the whole collection back. A failed write is logged and returned;
/// the in-memory change stays until the next mutation or reload, and
/// [`TaskStore::persist`] retries it.
pub struct TaskStore<S> {
    kv: S,
    groups: Vec<TaskGroup>,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn load(kv: S) -> Self {
        let mut store = Self {
            kv,
            groups: Vec::new(),
        };
        store.reload();
        store
    }

    /// Discard in-memory state and read the collection again.
    ///
    /// Items stored without an id are given one, and the collection is
    /// written back straight away so the ids survive the next load.
    pub fn reload(&mut self) {
        let stored: Vec<StoredGroup> = read_json(&self.kv, TASKS_KEY).unwrap_or_default();
        let (groups, assigned) = decode(stored);
        self.groups = normalize(groups);
        log::debug!("Loaded {} task groups", self.groups.len());
        if assigned > 0 {
            log::info!("Assigned ids to {} stored tasks", assigned);
            if let Err(e) = self.persist() {
                log::warn!("New task ids kept in memory only: {}", e);
            }
        }
    }

    pub fn list_groups(&self) -> &[TaskGroup] {
        &self.groups
    }

    pub fn group(&self, date: &str) -> Option<&TaskGroup> {
        self.groups.iter().find(|g| g.date == date)
    }

    pub fn add_task(&mut self, date: &str, task: Task) -> Result<(), StoreError> {
        self.reload();
        match self.groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.items.push(task),
            None => {
                let mut group = TaskGroup::new(date);
                group.items.push(task);
                self.groups.push(group);
            }
        }
        self.persist()
    }

    /// Flip the completion flag. Returns the new value, or `None` when no
    /// task matches (nothing is written).
    pub fn toggle_completed(&mut self, date: &str, id: Uuid) -> Result<Option<bool>, StoreError> {
        self.reload();
        let Some(task) = self
            .groups
            .iter_mut()
            .filter(|g| g.date == date)
            .flat_map(|g| g.items.iter_mut())
            .find(|t| t.id == id)
        else {
            return Ok(None);
        };
        let completed = task.toggle();
        self.persist()?;
        Ok(Some(completed))
    }

    /// Remove a task, dropping its group when it becomes empty.
    pub fn delete_task(&mut self, date: &str, id: Uuid) -> Result<Option<Task>, StoreError> {
        self.reload();
        let Some(gi) = self.groups.iter().position(|g| g.date == date) else {
            return Ok(None);
        };
        let Some(ti) = self.groups[gi].position(id) else {
            return Ok(None);
        };
        let removed = self.groups[gi].items.remove(ti);
        if self.groups[gi].items.is_empty() {
            log::debug!("Pruning empty group {}", date);
            self.groups.remove(gi);
        }
        self.persist()?;
        Ok(Some(removed))
    }

    pub fn persist(&self) -> Result<(), StoreError> {
        write_json(&self.kv, TASKS_KEY, &self.groups)
    }
}

#[derive(Debug, Deserialize)]
struct StoredGroup {
    date: String,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Decode each item on its own so one bad item does not take the rest of
/// the collection with it. Returns the groups and how many ids were assigned.
fn decode(stored: Vec<StoredGroup>) -> (Vec<TaskGroup>, usize) {
    let mut assigned = 0;
    let groups = stored
        .into_iter()
        .map(|group| {
            let items = group
                .items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<StoredTask>(item) {
                    Ok(task) => {
                        if task.id.is_none() {
                            assigned += 1;
                        }
                        Some(Task::from(task))
                    }
                    Err(e) => {
                        log::warn!("Dropping unreadable task on {}: {}", group.date, e);
                        None
                    }
                })
                .collect();
            TaskGroup {
                date: group.date,
                items,
            }
        })
        .collect();
    (groups, assigned)
}

/// Merge groups sharing a date and drop empty ones.
fn normalize(stored: Vec<TaskGroup>) -> Vec<TaskGroup> {
    let mut groups: Vec<TaskGroup> = Vec::with_capacity(stored.len());
    for group in stored {
        match groups.iter_mut().find(|g| g.date == group.date) {
            Some(existing) => {
                log::warn!("Merging duplicate task group {}", group.date);
                existing.items.extend(group.items);
            }
            None => groups.push(group),
        }
    }
    groups.retain(|g| !g.items.is_empty());
    groups
}
