use nudge_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub remind_at: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            title: reminder.title,
            remind_at: reminder.remind_at,
        }
    }
}

/// Due dates can be given either as unix millis or as an RFC 3339
/// timestamp string
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DueDateDTO {
    Millis(i64),
    Timestamp(String),
}
