use crate::reminder::DueReminder;
use serde::{Deserialize, Serialize};

/// Title used for every reminder notification
const PUSH_TITLE: &str = "Reminder";
/// Sound the provider should play on delivery
const PUSH_SOUND: &str = "default";

/// A `PushMessage` is the provider-facing payload derived from a due
/// `Reminder`. It only exists for the duration of one sweep cycle and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    /// The destination push token of the owning `User`
    pub to: String,
    pub title: String,
    pub body: String,
    pub sound: String,
}

impl PushMessage {
    /// Returns `None` when the owner token is empty, in which case there
    /// is no address to deliver to and the reminder must be dropped by
    /// the caller instead of handed to the gateway.
    pub fn from_due_reminder(due: &DueReminder) -> Option<Self> {
        if due.token.is_empty() {
            return None;
        }
        Some(Self {
            to: due.token.clone(),
            title: PUSH_TITLE.into(),
            body: due.reminder.title.clone(),
            sound: PUSH_SOUND.into(),
        })
    }
}
