use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use nudge_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        // Token uniqueness is checked under the same lock that performs
        // the insert, matching the unique constraint of the sql schema
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.token == user.token) {
            anyhow::bail!("A user with token: {} already exists", user.token);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_token(&self, token: &str) -> Option<User> {
        let mut users = find_by(&self.users, |u| u.token == token);
        if users.is_empty() {
            return None;
        }
        Some(users.remove(0))
    }
}
