use nudge_domain::ID;
use serde::{Deserialize, Serialize};

use crate::dtos::{DueDateDTO, ReminderDTO};

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub date: DueDateDTO,
    }

    pub type APIResponse = ReminderDTO;
}

pub mod get_reminders {
    use super::*;

    pub type APIResponse = Vec<ReminderDTO>;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }
}
