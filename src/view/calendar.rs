use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};

use crate::core::task::{Task, TaskGroup};
use crate::core::time;

/// Most dots drawn under a calendar day.
pub const MAX_DOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    /// Placeholder before day 1 so the first row lines up on Sunday.
    Blank,
    Day(CalendarDay),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    /// `DD/MM/YYYY`
    pub date: String,
    pub tasks: Vec<Task>,
}

impl CalendarDay {
    pub fn dot_colors(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .take(MAX_DOTS)
            .map(|t| t.color.as_str())
            .collect()
    }
}

/// One month laid out Sunday-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().filter_map(|c| match c {
            CalendarCell::Day(d) => Some(d),
            CalendarCell::Blank => None,
        })
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, CalendarCell::Blank))
            .count()
    }

    /// Cells chunked into rows of seven; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

/// Build the grid for `month` (1-12) of `year`, attaching each day's tasks by
/// exact date-string match. `None` for an invalid month.
pub fn generate_calendar(year: i32, month: u32, groups: &[TaskGroup]) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let mut by_date: HashMap<&str, Vec<Task>> = HashMap::new();
    for group in groups {
        by_date
            .entry(group.date.as_str())
            .or_default()
            .extend(group.items.iter().cloned());
    }

    let blanks = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<CalendarCell> = std::iter::repeat_n(CalendarCell::Blank, blanks).collect();

    for date in first.iter_days().take_while(|d| d.month() == month) {
        let date_str = time::format_date(date);
        let tasks = by_date.get(date_str.as_str()).cloned().unwrap_or_default();
        cells.push(CalendarCell::Day(CalendarDay {
            day: date.day(),
            date: date_str,
            tasks,
        }));
    }

    Some(MonthGrid { year, month, cells })
}

/// Which month is on screen and which day, if any, is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCursor {
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
    pub selected_day: Option<NaiveDate>,
}

impl CalendarCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            displayed_month: today.with_day(1).unwrap_or(today),
            selected_day: Some(today),
        }
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    /// Selecting the already selected day clears the selection.
    pub fn select_day(&mut self, date: NaiveDate) {
        if self.selected_day == Some(date) {
            self.selected_day = None;
        } else {
            self.selected_day = Some(date);
        }
    }

    pub fn title(&self) -> String {
        self.displayed_month.format("%B %Y").to_string()
    }

    pub fn grid(&self, groups: &[TaskGroup]) -> Option<MonthGrid> {
        generate_calendar(
            self.displayed_month.year(),
            self.displayed_month.month(),
            groups,
        )
    }

    /// Tasks on the selected day, sorted by time.
    pub fn selected_tasks(&self, groups: &[TaskGroup]) -> Vec<Task> {
        match self.selected_day {
            Some(day) => super::agenda::today_tasks(groups, day),
            None => Vec::new(),
        }
    }
}
