mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use nudge_domain::{DueReminder, Reminder, ID};
pub use postgres::PostgresReminderRepo;

use crate::repos::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// All reminders owned by the given user, in insertion order
    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder>;
    /// Deletes the reminder only when it is owned by the given user, so
    /// that an owner check never has to happen outside the storage layer
    async fn delete_for_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder>;
    /// All reminders with `remind_at <= before`, joined with the push
    /// token of their owner. This is the only read path of the sweeper.
    async fn find_due(&self, before: i64) -> Vec<DueReminder>;
    /// Bulk delete used by sweep reconciliation. Ids that are already
    /// gone are skipped, deleting them twice is not an error.
    async fn delete_many(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::user::IUserRepo;
    use crate::NudgeContext;
    use nudge_domain::User;

    async fn insert_user(ctx: &NudgeContext, token: &str) -> User {
        let user = User::new(token.into());
        ctx.repos.users.insert(&user).await.expect("To insert user");
        user
    }

    #[actix_rt::test]
    async fn lists_reminders_in_insertion_order() {
        let ctx = NudgeContext::create_inmemory();
        let user = insert_user(&ctx, "token").await;

        for (title, remind_at) in &[("first", 300), ("second", 100), ("third", 200)] {
            let reminder = Reminder::new(user.id.clone(), (*title).into(), *remind_at);
            ctx.repos
                .reminders
                .insert(&reminder)
                .await
                .expect("To insert reminder");
        }

        let reminders = ctx.repos.reminders.find_by_user(&user.id).await;
        let titles = reminders.iter().map(|r| r.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[actix_rt::test]
    async fn find_due_excludes_future_reminders() {
        let ctx = NudgeContext::create_inmemory();
        let user = insert_user(&ctx, "token").await;

        let due = Reminder::new(user.id.clone(), "past".into(), 1000);
        let upcoming = Reminder::new(user.id.clone(), "future".into(), 1001);
        ctx.repos.reminders.insert(&due).await.unwrap();
        ctx.repos.reminders.insert(&upcoming).await.unwrap();

        let found = ctx.repos.reminders.find_due(1000).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reminder, due);
        assert_eq!(found[0].token, "token");

        let found = ctx.repos.reminders.find_due(1001).await;
        assert_eq!(found.len(), 2);
    }

    #[actix_rt::test]
    async fn delete_for_user_checks_ownership() {
        let ctx = NudgeContext::create_inmemory();
        let owner = insert_user(&ctx, "owner").await;
        let other = insert_user(&ctx, "other").await;

        let reminder = Reminder::new(owner.id.clone(), "mine".into(), 100);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        assert!(ctx
            .repos
            .reminders
            .delete_for_user(&reminder.id, &other.id)
            .await
            .is_none());
        assert_eq!(ctx.repos.reminders.find_by_user(&owner.id).await.len(), 1);

        let deleted = ctx
            .repos
            .reminders
            .delete_for_user(&reminder.id, &owner.id)
            .await
            .expect("To delete own reminder");
        assert_eq!(deleted, reminder);
        assert!(ctx.repos.reminders.find_by_user(&owner.id).await.is_empty());
    }

    #[actix_rt::test]
    async fn delete_many_is_idempotent() {
        let ctx = NudgeContext::create_inmemory();
        let user = insert_user(&ctx, "token").await;

        let reminder = Reminder::new(user.id.clone(), "once".into(), 100);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let ids = vec![reminder.id.clone(), ID::new()];
        let res = ctx.repos.reminders.delete_many(&ids).await.unwrap();
        assert_eq!(res.deleted_count, 1);

        let res = ctx.repos.reminders.delete_many(&ids).await.unwrap();
        assert_eq!(res.deleted_count, 0);
    }
}
