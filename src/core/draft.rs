use chrono::NaiveDateTime;

use super::category::Category;
use super::color::Rgb;
use super::task::{DatedTask, Task};
use super::time;
use crate::error::ValidationError;

/// Unvalidated input from the "new task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    /// `DD/MM/YYYY`
    pub date: String,
    /// `HH:MM`
    pub hour: String,
    /// Selected or newly typed category. Unknown names are added to the set.
    pub category: Option<Category>,
    /// Overrides the category color on the task.
    pub color: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>, hour: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            hour: hour.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Check every field and build the task. Times before `now` (minute
    /// precision) are rejected.
    pub fn validate(&self, now: NaiveDateTime) -> Result<DatedTask, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.hour.trim().is_empty() {
            return Err(ValidationError::MissingHour);
        }
        let hour = time::parse_hour(&self.hour)
            .ok_or_else(|| ValidationError::InvalidHour(self.hour.clone()))?;
        let date = time::parse_date(&self.date)
            .ok_or_else(|| ValidationError::InvalidDate(self.date.clone()))?;
        let category = self
            .category
            .as_ref()
            .filter(|c| !c.name.trim().is_empty())
            .ok_or(ValidationError::MissingCategory)?;

        let color = self
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| {
                Rgb::from_hex(c)
                    .map(|_| c.to_string())
                    .ok_or_else(|| ValidationError::InvalidColor(c.to_string()))
            })
            .transpose()?;

        let date_str = time::format_date(date);
        let hour_str = time::format_hour(hour);
        if date.and_time(hour) < time::truncate_to_minute(now) {
            return Err(ValidationError::InPast {
                date: date_str,
                hour: hour_str,
            });
        }

        let mut task = Task::new(title, hour_str, category);
        if let Some(color) = color {
            task.color = color;
        }
        Ok(DatedTask {
            date: date_str,
            task,
        })
    }
}
