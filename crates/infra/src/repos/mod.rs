mod reminder;
mod shared;
mod user;

use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::PgPool;
use std::sync::Arc;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use reminder::IReminderRepo;
pub use shared::repo::DeleteResult;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        let users = Arc::new(InMemoryUserRepo::new());
        Self {
            users: users.clone(),
            reminders: Arc::new(InMemoryReminderRepo::new(users)),
        }
    }
}
