mod expo_push;

pub use expo_push::{ExpoPushRestApi, IPushGateway, PushTicket};
