//! Graph API endpoint paths, centralized so resource repositories never
//! hand-build URLs.

/// Look up a user id by primary mail address.
pub fn users_by_mail(email: &str) -> String {
    let filter = urlencoding::encode(&format!("mail eq '{email}'")).into_owned();
    format!("/users?$filter={filter}&$select=id")
}

pub fn calendar_events(user_id: &str) -> String {
    format!("/users/{user_id}/calendar/events")
}

pub fn calendar_event(user_id: &str, event_id: &str) -> String {
    format!("/users/{user_id}/calendar/events/{event_id}")
}

/// Expanded occurrences of all events overlapping a naive time window.
pub fn calendar_view(user_id: &str, start: &str, end: &str) -> String {
    format!("/users/{user_id}/calendarView?startDateTime={start}&endDateTime={end}")
}

pub fn todo_lists(user_id: &str) -> String {
    format!("/users/{user_id}/todo/lists")
}

pub fn todo_list(user_id: &str, list_id: &str) -> String {
    format!("/users/{user_id}/todo/lists/{list_id}")
}

pub fn todo_tasks(user_id: &str, list_id: &str) -> String {
    format!("/users/{user_id}/todo/lists/{list_id}/tasks")
}

pub fn todo_task(user_id: &str, list_id: &str, task_id: &str) -> String {
    format!("/users/{user_id}/todo/lists/{list_id}/tasks/{task_id}")
}

pub fn checklist_items(user_id: &str, list_id: &str, task_id: &str) -> String {
    format!("/users/{user_id}/todo/lists/{list_id}/tasks/{task_id}/checklistItems")
}

pub fn checklist_item(user_id: &str, list_id: &str, task_id: &str, item_id: &str) -> String {
    format!("/users/{user_id}/todo/lists/{list_id}/tasks/{task_id}/checklistItems/{item_id}")
}
