mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
use nudge_domain::{User, ID};
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    /// Inserts a new `User`. Fails when another `User` already holds the
    /// same token, which callers should treat as "created concurrently,
    /// look it up again".
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_token(&self, token: &str) -> Option<User>;
}
