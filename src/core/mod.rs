pub mod category;
pub mod color;
pub mod draft;
pub mod profile;
pub mod task;
pub mod time;
