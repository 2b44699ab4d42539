use crate::shared::entity::{Entity, ID};

/// A `Reminder` is a time-anchored note owned by a single `User`. Once
/// `remind_at` has elapsed the owner should receive a push notification
/// with the reminder `title` as the message body, after which the
/// `Reminder` is retired from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` that created this `Reminder` and that will be notified
    pub user_id: ID,
    pub title: String,
    /// The timestamp in unix millis at which the owner should be notified
    pub remind_at: i64,
}

impl Reminder {
    pub fn new(user_id: ID, title: String, remind_at: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            remind_at,
        }
    }
}

impl Entity<ID> for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// A due `Reminder` joined with the push token of its owner. This is the
/// row shape returned by the sweeper's read path so that the dispatcher
/// never has to resolve owners itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub reminder: Reminder,
    pub token: String,
}
