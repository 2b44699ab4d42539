mod date;
mod push_message;
mod reminder;
mod shared;
mod user;

pub use date::{parse_due_date, InvalidDateError};
pub use push_message::PushMessage;
pub use reminder::{DueReminder, Reminder};
pub use shared::entity::{Entity, ID};
pub use user::User;
