use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use crate::repos::user::{IUserRepo, InMemoryUserRepo};
use nudge_domain::{DueReminder, Reminder, ID};
use std::sync::Arc;

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
    // The sql implementation joins on the users table for the owner
    // token, the inmemory version does the same through the user repo
    users: Arc<InMemoryUserRepo>,
}

impl InMemoryReminderRepo {
    pub fn new(users: Arc<InMemoryUserRepo>) -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
            users,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |r| r.user_id == *user_id)
    }

    async fn delete_for_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder> {
        let mut deleted = find_and_delete_by(&self.reminders, |r| {
            r.id == *reminder_id && r.user_id == *user_id
        });
        if deleted.is_empty() {
            return None;
        }
        Some(deleted.remove(0))
    }

    async fn find_due(&self, before: i64) -> Vec<DueReminder> {
        let due = find_by(&self.reminders, |r| r.remind_at <= before);
        let mut due_with_token = Vec::with_capacity(due.len());
        for reminder in due {
            let token = match self.users.find(&reminder.user_id).await {
                Some(user) => user.token,
                None => continue,
            };
            due_with_token.push(DueReminder { reminder, token });
        }
        due_with_token
    }

    async fn delete_many(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        let deleted = find_and_delete_by(&self.reminders, |r| reminder_ids.contains(&r.id));
        Ok(DeleteResult {
            deleted_count: deleted.len() as i64,
        })
    }
}
