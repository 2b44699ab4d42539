use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use nudge_domain::{DueReminder, Reminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    title: String,
    remind_at: i64,
}

#[derive(Debug, FromRow)]
struct DueReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    title: String,
    remind_at: i64,
    token: String,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            remind_at: raw.remind_at,
        }
    }
}

impl From<DueReminderRaw> for DueReminder {
    fn from(raw: DueReminderRaw) -> Self {
        Self {
            reminder: Reminder {
                id: raw.reminder_uid.into(),
                user_id: raw.user_uid.into(),
                title: raw.title,
                remind_at: raw.remind_at,
            },
            token: raw.token,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders(reminder_uid, user_uid, title, remind_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(reminder.remind_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT reminder_uid, user_uid, title, remind_at FROM reminders
            WHERE user_uid = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|reminder| reminder.into())
        .collect()
    }

    async fn delete_for_user(&self, reminder_id: &ID, user_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1 AND user_uid = $2
            RETURNING reminder_uid, user_uid, title, remind_at
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|reminder| reminder.into())
    }

    async fn find_due(&self, before: i64) -> Vec<DueReminder> {
        sqlx::query_as::<_, DueReminderRaw>(
            r#"
            SELECT r.reminder_uid, r.user_uid, r.title, r.remind_at, u.token
            FROM reminders AS r
            INNER JOIN users AS u ON u.user_uid = r.user_uid
            WHERE r.remind_at <= $1
            ORDER BY r.seq ASC
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|due| due.into())
        .collect()
    }

    async fn delete_many(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        let ids = reminder_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
