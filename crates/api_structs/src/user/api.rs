use serde::{Deserialize, Serialize};

use crate::dtos::UserDTO;

pub mod get_me {
    use super::*;

    pub type APIResponse = UserDTO;
}

pub mod create_user {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub token: String,
    }

    pub type APIResponse = UserDTO;
}
