//! Microsoft To Do: lists, tasks, and checklist items (subtasks).
//!
//! Every operation addresses resources by display name, resolved to Graph
//! ids per request: user mail, then list name, then task title, then
//! checklist item name. Name matching is case-insensitive and fails loud on
//! duplicates.

pub mod lists;
pub mod subtasks;
pub mod tasks;

pub use lists::TodoListsManager;
pub use subtasks::SubtasksManager;
pub use tasks::TasksManager;
