use crate::shared::entity::{Entity, ID};

/// A `User` is identified by the opaque device push token it registered
/// with. The token doubles as the authentication credential for the HTTP
/// api and as the destination address for push notifications.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub token: String,
}

impl User {
    pub fn new(token: String) -> Self {
        Self {
            id: Default::default(),
            token,
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
