use uuid::Uuid;

use crate::core::category::Icon;
use crate::core::draft::TaskDraft;

/// Commands the presentation layer sends to the [`Planner`](crate::planner::Planner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Tasks
    AddTask(TaskDraft),
    ToggleTask { date: String, id: Uuid },
    DeleteTask { date: String, id: Uuid },

    // Categories
    AddCategory { name: String, icon: Icon, color: String },
    RemoveCategory(String),

    // Onboarding
    SetUserName(String),

    /// Drop in-memory state and read everything from the store again.
    Reload,
}
