//! Read-only projections over the task collection. Nothing here writes to
//! the store; every function recomputes from the groups it is given.

pub mod agenda;
pub mod calendar;
pub mod notify;
pub mod refresh;
pub mod search;

pub use agenda::{Agenda, day_label, sort_by_time_of_day, today_tasks};
pub use calendar::{CalendarCell, CalendarCursor, CalendarDay, MonthGrid, generate_calendar};
pub use notify::{due_later_today, due_within_window};
pub use refresh::RefreshTimer;
pub use search::SearchFilter;
